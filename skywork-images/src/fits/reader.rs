use super::header::{BitPix, Header};
use super::{FitsError, Result, BLOCK_SIZE};
use byteorder::{BigEndian, ByteOrder};
use log::debug;
use ndarray::Array2;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A decoded primary image.
///
/// `data` has shape `(NAXIS2, NAXIS1)`: row `r` holds the `r`-th run of
/// `NAXIS1` pixels as stored in the file.
#[derive(Debug, Clone)]
pub struct FitsImage {
    pub header: Header,
    pub bitpix: BitPix,
    pub data: Array2<f64>,
}

impl FitsImage {
    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// What `HDUList.info()` prints for the primary HDU.
#[derive(Debug, Clone, PartialEq)]
pub struct HduSummary {
    pub cards: usize,
    pub bitpix: BitPix,
    /// FITS axis order (`NAXIS1` first).
    pub dimensions: Vec<usize>,
    pub bscale: f64,
    pub bzero: f64,
}

impl fmt::Display for HduSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self
            .dimensions
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            f,
            "{:<4}{:<10}{:>4}  {:<11}{:>6}   {:<14}{}",
            "No.", "Name", "Ver", "Type", "Cards", "Dimensions", "Format"
        )?;
        write!(
            f,
            "{:<4}{:<10}{:>4}  {:<11}{:>6}   {:<14}{}",
            0,
            "PRIMARY",
            1,
            "PrimaryHDU",
            self.cards,
            format!("({})", dims),
            self.bitpix.type_name()
        )?;
        if self.bscale != 1.0 || self.bzero != 0.0 {
            write!(f, "\n    BSCALE = {}  BZERO = {}", self.bscale, self.bzero)?;
        }
        Ok(())
    }
}

/// Reads header blocks up to `END` and checks for a primary header.
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut header = Header::new();
    let mut block = vec![0u8; BLOCK_SIZE];
    let mut blocks = 0usize;

    loop {
        reader.read_exact(&mut block).map_err(FitsError::from_read)?;
        blocks += 1;
        if header.parse_block(&block)? {
            break;
        }
    }

    if !header.is_primary() {
        return Err(FitsError::InvalidFormat(
            "Primary header must start with SIMPLE = T".to_string(),
        ));
    }

    debug!("Parsed {} header cards in {} blocks", header.len(), blocks);
    Ok(header)
}

pub fn read_primary_image<P: AsRef<Path>>(path: P) -> Result<FitsImage> {
    let path = path.as_ref();
    debug!("Reading FITS image {:?}", path);
    let file = File::open(path)?;
    read_primary_image_from(BufReader::new(file))
}

/// Decodes the primary HDU of a FITS stream as a 2-D image.
///
/// # Errors
///
/// - [`FitsError::InvalidFormat`] if the HDU is not a 2-D image
/// - [`FitsError::InvalidBitPix`] for an unsupported `BITPIX`
/// - [`FitsError::UnexpectedEof`] if the header or data is truncated
pub fn read_primary_image_from<R: Read>(mut reader: R) -> Result<FitsImage> {
    let header = read_header(&mut reader)?;
    let bitpix = header.bitpix()?;
    let axes = header.axes()?;

    if axes.len() != 2 {
        return Err(FitsError::InvalidFormat(format!(
            "Expected a 2-D primary image, found NAXIS = {}",
            axes.len()
        )));
    }
    let (cols, rows) = (axes[0], axes[1]);

    let bscale = header.real_or("BSCALE", 1.0)?;
    let bzero = header.real_or("BZERO", 0.0)?;

    let byte_len = cols
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(bitpix.bytes_per_pixel()))
        .ok_or_else(|| {
            FitsError::InvalidFormat(format!("Image of {}x{} pixels is too large", cols, rows))
        })?;

    let mut raw = vec![0u8; byte_len];
    reader.read_exact(&mut raw).map_err(FitsError::from_read)?;

    let mut values = decode_big_endian(&raw, bitpix);
    if bscale != 1.0 || bzero != 0.0 {
        for v in &mut values {
            *v = bzero + bscale * *v;
        }
    }

    let data = Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| FitsError::InvalidFormat(e.to_string()))?;

    debug!(
        "Decoded {}x{} image, BITPIX = {}",
        rows,
        cols,
        bitpix.value()
    );

    Ok(FitsImage {
        header,
        bitpix,
        data,
    })
}

fn decode_big_endian(raw: &[u8], bitpix: BitPix) -> Vec<f64> {
    let width = bitpix.bytes_per_pixel();
    let chunks = raw.chunks_exact(width);
    match bitpix {
        BitPix::U8 => raw.iter().map(|&b| b as f64).collect(),
        BitPix::I16 => chunks.map(|c| BigEndian::read_i16(c) as f64).collect(),
        BitPix::I32 => chunks.map(|c| BigEndian::read_i32(c) as f64).collect(),
        BitPix::I64 => chunks.map(|c| BigEndian::read_i64(c) as f64).collect(),
        BitPix::F32 => chunks.map(|c| BigEndian::read_f32(c) as f64).collect(),
        BitPix::F64 => chunks.map(BigEndian::read_f64).collect(),
    }
}

/// Header-only summary of a file's primary HDU.
pub fn describe<P: AsRef<Path>>(path: P) -> Result<HduSummary> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let header = read_header(&mut reader)?;

    Ok(HduSummary {
        cards: header.len(),
        bitpix: header.bitpix()?,
        dimensions: header.axes()?,
        bscale: header.real_or("BSCALE", 1.0)?,
        bzero: header.real_or("BZERO", 0.0)?,
    })
}
