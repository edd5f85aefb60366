#![allow(unexpected_cfgs)]

mod commands;
mod error;
mod util;
use argh::FromArgs;
use core::error::Error;

#[derive(FromArgs, Debug)]
/// Texture image processing tool
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Resize(commands::resize::ResizeCmd),
    Mipmaps(commands::mipmaps::MipmapsCmd),
    Decode(commands::decode::DecodeCmd),
    Compare(commands::compare::CompareCmd),
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli: TopLevel = argh::from_env();

    match cli.command {
        Commands::Resize(cmd) => {
            commands::resize::handle_resize_command(cmd)?;
        }
        Commands::Mipmaps(cmd) => {
            commands::mipmaps::handle_mipmaps_command(cmd)?;
        }
        Commands::Decode(cmd) => {
            commands::decode::handle_decode_command(cmd)?;
        }
        Commands::Compare(cmd) => {
            commands::compare::handle_compare_command(cmd)?;
        }
    }

    Ok(())
}
