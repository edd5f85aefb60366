//! Parsers for CLI option values.

use teximage_api::{BlockFormat, Decoder, MipmapFilter, ResizeFilter, RoundMode};

pub fn parse_resize_filter(value: &str) -> Result<ResizeFilter, String> {
    match value.to_lowercase().as_str() {
        "box" => Ok(ResizeFilter::Box),
        "triangle" => Ok(ResizeFilter::Triangle),
        "kaiser" => Ok(ResizeFilter::Kaiser),
        "mitchell" => Ok(ResizeFilter::Mitchell),
        _ => Err(format!(
            "Unknown filter: {value}. Valid options: box, triangle, kaiser, mitchell"
        )),
    }
}

pub fn parse_mipmap_filter(value: &str) -> Result<MipmapFilter, String> {
    match value.to_lowercase().as_str() {
        "box" => Ok(MipmapFilter::Box),
        "triangle" => Ok(MipmapFilter::Triangle),
        "kaiser" => Ok(MipmapFilter::Kaiser),
        _ => Err(format!(
            "Unknown mipmap filter: {value}. Valid options: box, triangle, kaiser"
        )),
    }
}

pub fn parse_round_mode(value: &str) -> Result<RoundMode, String> {
    match value.to_lowercase().as_str() {
        "none" => Ok(RoundMode::None),
        "next" => Ok(RoundMode::ToNextPowerOfTwo),
        "nearest" => Ok(RoundMode::ToNearestPowerOfTwo),
        "previous" => Ok(RoundMode::ToPreviousPowerOfTwo),
        _ => Err(format!(
            "Unknown round mode: {value}. Valid options: none, next, nearest, previous"
        )),
    }
}

pub fn parse_block_format(value: &str) -> Result<BlockFormat, String> {
    match value.to_lowercase().as_str() {
        "bc1" | "dxt1" => Ok(BlockFormat::Bc1),
        "bc2" | "dxt3" => Ok(BlockFormat::Bc2),
        "bc3" | "dxt5" => Ok(BlockFormat::Bc3),
        _ => Err(format!(
            "Invalid block format: {value}. Valid types are: bc1, bc2, bc3"
        )),
    }
}

pub fn parse_decoder(value: &str) -> Result<Decoder, String> {
    match value.to_lowercase().as_str() {
        "reference" => Ok(Decoder::Reference),
        "nv5x" => Ok(Decoder::Nv5x),
        _ => Err(format!(
            "Unknown decoder: {value}. Valid options: reference, nv5x"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("box", ResizeFilter::Box)]
    #[case("Kaiser", ResizeFilter::Kaiser)]
    #[case("MITCHELL", ResizeFilter::Mitchell)]
    fn parses_resize_filters(#[case] value: &str, #[case] expected: ResizeFilter) {
        assert_eq!(parse_resize_filter(value), Ok(expected));
    }

    #[rstest]
    #[case("dxt1", BlockFormat::Bc1)]
    #[case("bc2", BlockFormat::Bc2)]
    #[case("DXT5", BlockFormat::Bc3)]
    fn parses_block_format_aliases(#[case] value: &str, #[case] expected: BlockFormat) {
        assert_eq!(parse_block_format(value), Ok(expected));
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(parse_resize_filter("lanczos").is_err());
        assert!(parse_mipmap_filter("mitchell").is_err());
        assert!(parse_round_mode("up").is_err());
        assert!(parse_block_format("bc7").is_err());
        assert!(parse_decoder("amd").is_err());
    }

    #[test]
    fn parses_round_modes_and_decoders() {
        assert_eq!(parse_round_mode("nearest"), Ok(RoundMode::ToNearestPowerOfTwo));
        assert_eq!(parse_decoder("NV5X"), Ok(Decoder::Nv5x));
    }
}
