use crate::error::CliError;
use crate::util::{
    canonicalize_cli_path, count_file_bytes, find_all_files, for_each_entry, output_path,
    parse_resize_filter, parse_round_mode, Throughput,
};
use argh::FromArgs;
use bytesize::ByteSize;
use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};
use teximage_api::{AlphaMode, ResizeFilter, RoundMode, TexImage};

#[derive(FromArgs, Debug)]
/// Resize every image in a directory
#[argh(subcommand, name = "resize")]
pub struct ResizeCmd {
    /// input directory path
    #[argh(option, from_str_fn(canonicalize_cli_path))]
    pub input: PathBuf,

    /// output directory path
    #[argh(option, from_str_fn(canonicalize_cli_path))]
    pub output: PathBuf,

    /// exact output width, requires --height
    #[argh(option)]
    pub width: Option<u32>,

    /// exact output height, requires --width
    #[argh(option)]
    pub height: Option<u32>,

    /// largest allowed side when no exact size is given, 0 for unbounded [default: 0]
    #[argh(option, default = "0")]
    pub max_extent: u32,

    /// power of two rounding: none, next, nearest, previous [default: none]
    #[argh(option, default = "RoundMode::None", from_str_fn(parse_round_mode))]
    pub round: RoundMode,

    /// filter: box, triangle, kaiser, mitchell [default: mitchell]
    #[argh(option, default = "ResizeFilter::Mitchell", from_str_fn(parse_resize_filter))]
    pub filter: ResizeFilter,

    /// weight colour by alpha while filtering
    #[argh(switch)]
    pub transparency: bool,

    /// output file extension [default: png]
    #[argh(option, default = "String::from(\"png\")")]
    pub format: String,
}

/// Target extent requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Exact(u32, u32),
    Fit(u32, RoundMode),
}

impl ResizeCmd {
    fn target(&self) -> Target {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Target::Exact(w, h),
            _ => Target::Fit(self.max_extent, self.round),
        }
    }
}

pub fn handle_resize_command(cmd: ResizeCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries = Vec::new();
    find_all_files(&cmd.input, &mut entries)?;

    if entries.is_empty() {
        println!("No files found in input directory.");
        return Ok(());
    }

    println!("Found {} files to resize\n", entries.len());

    let start = Instant::now();
    let bytes_processed = AtomicU64::new(0);

    for_each_entry(&entries, |entry| {
        let path = entry.path();
        count_file_bytes(&path, &bytes_processed);
        resize_file(&cmd, &path)
    });

    let elapsed = start.elapsed();
    let total_bytes = bytes_processed.load(Ordering::Relaxed);

    println!("\n=== Resize Complete ===");
    println!("Time taken: {elapsed:.2?}");
    println!("Data processed: {}", ByteSize(total_bytes));
    println!("Throughput: {}", Throughput::from_elapsed(total_bytes, elapsed));

    Ok(())
}

fn resize_file(cmd: &ResizeCmd, path: &Path) -> Result<(), CliError> {
    let mut image = TexImage::new();
    image.load(path).map_err(|source| CliError::File {
        path: path.display().to_string(),
        source,
    })?;

    if cmd.transparency {
        image.set_alpha_mode(AlphaMode::Transparency);
    }

    let (w, h) = (image.width(), image.height());
    match cmd.target() {
        Target::Exact(width, height) => image.resize(width, height, cmd.filter),
        Target::Fit(max_extent, round) => image.resize_to_extent(max_extent, round, cmd.filter),
    }

    let target = output_path(path, &cmd.input, &cmd.output, "", &cmd.format)?;
    image.save(&target)?;

    println!(
        "{}: {w}x{h} -> {}x{}",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(width: Option<u32>, height: Option<u32>) -> ResizeCmd {
        ResizeCmd {
            input: PathBuf::new(),
            output: PathBuf::new(),
            width,
            height,
            max_extent: 256,
            round: RoundMode::ToNearestPowerOfTwo,
            filter: ResizeFilter::Box,
            transparency: false,
            format: String::from("png"),
        }
    }

    #[test]
    fn exact_size_needs_both_sides() {
        assert_eq!(cmd(Some(3), Some(4)).target(), Target::Exact(3, 4));
        assert_eq!(
            cmd(Some(3), None).target(),
            Target::Fit(256, RoundMode::ToNearestPowerOfTwo)
        );
    }

    #[test]
    fn resizes_files_into_output_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        std::fs::create_dir_all(&input).unwrap();

        let mut image = TexImage::new();
        image.allocate(8, 4);
        image.fill(0.0, 1.0, 0.0, 1.0);
        image.save(input.join("leaf.png")).unwrap();

        let mut cmd = cmd(Some(2), Some(2));
        cmd.input = input.clone();
        cmd.output = output.clone();
        resize_file(&cmd, &input.join("leaf.png")).unwrap();

        let mut resized = TexImage::new();
        resized.load(output.join("leaf.png")).unwrap();
        assert_eq!((resized.width(), resized.height()), (2, 2));
    }
}
