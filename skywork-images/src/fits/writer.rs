use super::header::{HeaderCard, HeaderValue};
use super::{Result, BLOCK_SIZE, CARD_SIZE};
use byteorder::{BigEndian, WriteBytesExt};
use log::debug;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_primary_image<P: AsRef<Path>>(path: P, image: &Array2<f64>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_primary_image_to(&mut writer, image)?;
    writer.flush()?;
    debug!("Wrote {:?} image to {:?}", image.dim(), path);
    Ok(())
}

/// Writes `image` as a `BITPIX = -64` primary HDU, rows in array order.
pub fn write_primary_image_to<W: Write>(writer: &mut W, image: &Array2<f64>) -> Result<()> {
    let (rows, cols) = image.dim();
    let cards = [
        HeaderCard::new("SIMPLE", HeaderValue::Logical(true)).with_comment("conforms to FITS standard"),
        HeaderCard::new("BITPIX", HeaderValue::Integer(-64)).with_comment("array data type"),
        HeaderCard::new("NAXIS", HeaderValue::Integer(2)).with_comment("number of array dimensions"),
        HeaderCard::new("NAXIS1", HeaderValue::Integer(cols as i64)),
        HeaderCard::new("NAXIS2", HeaderValue::Integer(rows as i64)),
    ];

    let mut header_len = 0;
    for card in &cards {
        writer.write_all(&card.to_bytes())?;
        header_len += CARD_SIZE;
    }
    writer.write_all(&HeaderCard::end())?;
    header_len += CARD_SIZE;
    pad(writer, header_len, b' ')?;

    for &value in image.iter() {
        writer.write_f64::<BigEndian>(value)?;
    }
    pad(writer, image.len() * 8, 0)?;
    Ok(())
}

fn pad<W: Write>(writer: &mut W, written: usize, fill: u8) -> Result<()> {
    let remainder = written % BLOCK_SIZE;
    if remainder != 0 {
        writer.write_all(&vec![fill; BLOCK_SIZE - remainder])?;
    }
    Ok(())
}
