use crate::error::CliError;
use crate::util::{parse_block_format, parse_decoder};
use argh::FromArgs;
use bytesize::ByteSize;
use std::{fs, path::PathBuf, time::Instant};
use teximage_api::{BlockFormat, Decoder, TexImage};

#[derive(FromArgs, Debug)]
/// Decode raw BC1/BC2/BC3 block data into an image file
#[argh(subcommand, name = "decode")]
pub struct DecodeCmd {
    /// file holding the blocks in row-major block order
    #[argh(option)]
    pub input: PathBuf,

    /// image file to write; the extension picks the format
    #[argh(option)]
    pub output: PathBuf,

    /// block format: bc1, bc2, bc3
    #[argh(option, from_str_fn(parse_block_format))]
    pub format: BlockFormat,

    /// palette evaluation: reference, nv5x [default: reference]
    #[argh(option, default = "Decoder::Reference", from_str_fn(parse_decoder))]
    pub decoder: Decoder,

    /// image width in pixels
    #[argh(option)]
    pub width: u32,

    /// image height in pixels
    #[argh(option)]
    pub height: u32,

    /// bytes to skip before the first block, e.g. a container header [default: 0]
    #[argh(option, default = "0")]
    pub offset: usize,
}

pub fn handle_decode_command(cmd: DecodeCmd) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let data = fs::read(&cmd.input)?;
    let image = decode(&cmd, &data)?;
    image.save(&cmd.output)?;

    println!(
        "Decoded {} ({}) as {:?} {}x{} with the {:?} decoder in {:.2?}",
        cmd.input.display(),
        ByteSize(data.len() as u64),
        cmd.format,
        cmd.width,
        cmd.height,
        cmd.decoder,
        start.elapsed()
    );
    Ok(())
}

fn decode(cmd: &DecodeCmd, data: &[u8]) -> Result<TexImage, CliError> {
    let blocks = data.get(cmd.offset..).unwrap_or_default();

    let mut image = TexImage::new();
    image.allocate(cmd.width, cmd.height);
    image.set_image_2d_compressed(cmd.format, cmd.decoder, cmd.width, cmd.height, 0, blocks)?;
    Ok(image)
}
