use crate::error::CliError;
use argh::FromArgs;
use std::path::{Path, PathBuf};
use teximage_api::{AlphaMode, TexImage};

#[derive(FromArgs, Debug)]
/// Compare an image against a reference
#[argh(subcommand, name = "compare")]
pub struct CompareCmd {
    /// image to measure
    #[argh(option)]
    pub image: PathBuf,

    /// reference image
    #[argh(option)]
    pub reference: PathBuf,

    /// weight the colour error by the reference alpha
    #[argh(switch)]
    pub transparency: bool,

    /// alpha reference for the coverage report [default: 0.5]
    #[argh(option, default = "0.5")]
    pub alpha_ref: f32,
}

/// Error and coverage figures for an image pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub rmse_rgb: f32,
    pub rmse_alpha: f32,
    pub coverage: f32,
    pub reference_coverage: f32,
}

pub fn handle_compare_command(cmd: CompareCmd) -> Result<(), Box<dyn std::error::Error>> {
    let image = load(&cmd.image)?;
    let mut reference = load(&cmd.reference)?;
    if cmd.transparency {
        reference.set_alpha_mode(AlphaMode::Transparency);
    }

    let result = compare(&image, &reference, cmd.alpha_ref)?;

    println!("=== Comparison ===");
    println!("RMSE (RGB): {:.6}", result.rmse_rgb);
    println!("RMSE (alpha): {:.6}", result.rmse_alpha);
    println!(
        "Alpha coverage at {}: {:.4} (reference {:.4})",
        cmd.alpha_ref, result.coverage, result.reference_coverage
    );
    Ok(())
}

fn load(path: &Path) -> Result<TexImage, CliError> {
    let mut image = TexImage::new();
    image.load(path).map_err(|source| CliError::File {
        path: path.display().to_string(),
        source,
    })?;
    Ok(image)
}

fn compare(image: &TexImage, reference: &TexImage, alpha_ref: f32) -> Result<Comparison, CliError> {
    let rmse_rgb = image.root_mean_squared_error_rgb(reference);
    if rmse_rgb == f32::MAX {
        return Err(CliError::Incompatible(format!(
            "{}x{} vs {}x{}",
            image.width(),
            image.height(),
            reference.width(),
            reference.height()
        )));
    }

    Ok(Comparison {
        rmse_rgb,
        rmse_alpha: image.root_mean_squared_error_alpha(reference),
        coverage: image.alpha_test_coverage(alpha_ref),
        reference_coverage: reference.alpha_test_coverage(alpha_ref),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [f32; 4]) -> TexImage {
        let mut image = TexImage::new();
        image.allocate(width, height);
        image.fill(rgba[0], rgba[1], rgba[2], rgba[3]);
        image
    }

    #[test]
    fn reports_errors_and_coverage() {
        let image = solid(2, 2, [0.0, 0.0, 0.0, 1.0]);
        let reference = solid(2, 2, [0.0, 0.0, 0.5, 0.0]);

        let result = compare(&image, &reference, 0.5).unwrap();
        assert!((result.rmse_rgb - 0.5).abs() < 1e-6);
        assert!((result.rmse_alpha - 1.0).abs() < 1e-6);
        assert_eq!(result.coverage, 1.0);
        assert_eq!(result.reference_coverage, 0.0);
    }

    #[test]
    fn different_sizes_are_incompatible() {
        let result = compare(&solid(2, 2, [0.0; 4]), &solid(4, 4, [0.0; 4]), 0.5);
        assert!(matches!(result, Err(CliError::Incompatible(_))));
    }
}
