//! Encoding rendered discs for printing and download.

use std::io::Write;

use thiserror::Error;

use crate::engine::Raster;

#[derive(Debug, Error)]
pub enum ExportError {
	#[error("a {diameter_mm} mm disc at {dpi} dpi has no pixels")]
	Empty { diameter_mm: f32, dpi: f32 },
	#[error("a {size} px disc exceeds the {max} px export limit")]
	TooLarge { size: u32, max: u32 },
	#[error("png encoding failed")]
	Png(#[from] png::EncodingError),
}

static_assertions::assert_impl_all!(ExportError: std::error::Error, Send, Sync);

/// Writes `raster` as an 8-bit RGBA PNG.
pub fn encode_png(raster: &Raster, out: impl Write) -> Result<(), ExportError> {
	let mut encoder = png::Encoder::new(out, raster.width(), raster.height());
	encoder.set_color(png::ColorType::Rgba);
	encoder.set_depth(png::BitDepth::Eight);
	encoder.set_compression(png::Compression::Best);
	encoder.write_header()?.write_image_data(raster.as_bytes())?;
	Ok(())
}

pub fn encode_data_url(data: &[u8], mediatype: Option<&str>) -> String {
	use base64::engine::*;
	let mediatype = mediatype.unwrap_or("");
	let data = general_purpose::STANDARD.encode(data);
	format!("data:{mediatype};base64,{data}")
}

/// Encodes `raster` as a PNG `data:` URL, suitable for a download link.
pub fn encode_raster_as_url(raster: &Raster) -> anyhow::Result<String> {
	let mut png_data = Vec::new();
	encode_png(raster, &mut png_data)?;
	Ok(encode_data_url(&png_data, Some("image/png")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::{Rgba, Surface};
	use glam::{vec2, Affine2};

	#[test]
	fn test_encode_png_round_trip() {
		let mut raster = Raster::new(20, 10);
		raster.clear();
		raster.fill_circle(Affine2::IDENTITY, vec2(10.0, 5.0), 4.0, Rgba::RED);

		let mut data = Vec::new();
		encode_png(&raster, &mut data).unwrap();
		assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");

		let decoder = png::Decoder::new(data.as_slice());
		let mut reader = decoder.read_info().unwrap();
		let mut pixels = vec![0; reader.output_buffer_size()];
		let info = reader.next_frame(&mut pixels).unwrap();
		assert_eq!((info.width, info.height), (20, 10));
		assert_eq!(info.color_type, png::ColorType::Rgba);
		assert_eq!(&pixels[..info.buffer_size()], raster.as_bytes());
	}

	#[test]
	fn test_data_url() {
		assert_eq!(
			encode_data_url(b"disc", Some("image/png")),
			"data:image/png;base64,ZGlzYw=="
		);
		assert_eq!(encode_data_url(&[], None), "data:;base64,");
	}

	#[test]
	fn test_raster_url() {
		let url = encode_raster_as_url(&Raster::new(2, 2)).unwrap();
		assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
	}

	#[test]
	fn test_error_messages() {
		let error = ExportError::Empty {
			diameter_mm: 0.0,
			dpi: 300.0,
		};
		assert_eq!(error.to_string(), "a 0 mm disc at 300 dpi has no pixels");
	}
}
