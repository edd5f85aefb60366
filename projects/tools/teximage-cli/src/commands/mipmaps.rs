use crate::error::CliError;
use crate::util::{
    canonicalize_cli_path, count_file_bytes, find_all_files, for_each_entry, output_path,
    parse_mipmap_filter, Throughput,
};
use argh::FromArgs;
use bytesize::ByteSize;
use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};
use teximage_api::{AlphaMode, MipmapFilter, TexImage, TexImageError};

#[derive(FromArgs, Debug)]
/// Build the mip chain of every image in a directory, one file per level
#[argh(subcommand, name = "mipmaps")]
pub struct MipmapsCmd {
    /// input directory path
    #[argh(option, from_str_fn(canonicalize_cli_path))]
    pub input: PathBuf,

    /// output directory path
    #[argh(option, from_str_fn(canonicalize_cli_path))]
    pub output: PathBuf,

    /// filter: box, triangle, kaiser [default: box]
    #[argh(option, default = "MipmapFilter::Box", from_str_fn(parse_mipmap_filter))]
    pub filter: MipmapFilter,

    /// gamma the images are stored in; filtering happens in linear space [default: 2.2]
    #[argh(option, default = "2.2")]
    pub gamma: f32,

    /// weight colour by alpha while filtering
    #[argh(switch)]
    pub transparency: bool,

    /// keep the base level's alpha-test coverage at this alpha reference in every level
    #[argh(option)]
    pub coverage_ref: Option<f32>,

    /// output file extension [default: png]
    #[argh(option, default = "String::from(\"png\")")]
    pub format: String,
}

pub fn handle_mipmaps_command(cmd: MipmapsCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries = Vec::new();
    find_all_files(&cmd.input, &mut entries)?;

    if entries.is_empty() {
        println!("No files found in input directory.");
        return Ok(());
    }

    println!("Found {} files to mipmap\n", entries.len());

    let start = Instant::now();
    let bytes_processed = AtomicU64::new(0);

    for_each_entry(&entries, |entry| {
        let path = entry.path();
        count_file_bytes(&path, &bytes_processed);
        mipmap_file(&cmd, &path).map(|levels| {
            println!("{}: {levels} levels", path.display());
        })
    });

    let elapsed = start.elapsed();
    let total_bytes = bytes_processed.load(Ordering::Relaxed);

    println!("\n=== Mipmaps Complete ===");
    println!("Time taken: {elapsed:.2?}");
    println!("Data processed: {}", ByteSize(total_bytes));
    println!("Throughput: {}", Throughput::from_elapsed(total_bytes, elapsed));

    Ok(())
}

/// Writes every level of `path`'s mip chain, returning the number of levels written.
fn mipmap_file(cmd: &MipmapsCmd, path: &Path) -> Result<u32, CliError> {
    let mut base = TexImage::new();
    base.load(path).map_err(|source| CliError::File {
        path: path.display().to_string(),
        source,
    })?;

    if cmd.transparency {
        base.set_alpha_mode(AlphaMode::Transparency);
    }

    let coverage = cmd
        .coverage_ref
        .map(|alpha_ref| (base.alpha_test_coverage(alpha_ref), alpha_ref));

    base.save(output_path(path, &cmd.input, &cmd.output, "_mip0", &cmd.format)?)?;

    let mut linear = base.clone();
    linear.to_linear(cmd.gamma);

    let mut level = 0;
    loop {
        match linear.build_next_mipmap(cmd.filter) {
            Ok(()) => level += 1,
            Err(TexImageError::MipmapChainComplete) => break,
            Err(e) => return Err(e.into()),
        }

        let mut mip = linear.clone();
        mip.to_gamma(cmd.gamma);
        if let Some((coverage, alpha_ref)) = coverage {
            mip.scale_alpha_to_coverage(coverage, alpha_ref);
        }

        let suffix = format!("_mip{level}");
        mip.save(output_path(path, &cmd.input, &cmd.output, &suffix, &cmd.format)?)?;
    }

    Ok(level + 1)
}
