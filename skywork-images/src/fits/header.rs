use super::{FitsError, Result, BLOCK_SIZE, CARD_SIZE};
use std::collections::HashMap;
use std::fmt;
use std::str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitPix {
    U8 = 8,
    I16 = 16,
    I32 = 32,
    I64 = 64,
    F32 = -32,
    F64 = -64,
}

impl BitPix {
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            8 => Some(Self::U8),
            16 => Some(Self::I16),
            32 => Some(Self::I32),
            64 => Some(Self::I64),
            -32 => Some(Self::F32),
            -64 => Some(Self::F64),
            _ => None,
        }
    }

    pub fn value(self) -> i64 {
        self as i64
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::I64 | Self::F64 => 8,
        }
    }

    /// numpy-style type name, as printed in HDU summaries.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Logical(bool),
    Integer(i64),
    Real(f64),
    String(String),
}

impl HeaderValue {
    pub fn as_logical(&self) -> Option<bool> {
        match self {
            Self::Logical(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to `f64`.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    fn parse(text: &str) -> Self {
        match text {
            "T" => return Self::Logical(true),
            "F" => return Self::Logical(false),
            _ => {}
        }
        if let Ok(int_val) = text.parse::<i64>() {
            return Self::Integer(int_val);
        }
        // Fortran-style exponents such as 1.5D+03.
        if let Ok(float_val) = text.replace(['D', 'd'], "E").parse::<f64>() {
            return Self::Real(float_val);
        }
        Self::String(text.to_string())
    }

    /// Fixed-format value field: strings left-justified, everything else
    /// right-justified in columns 11-30.
    pub(crate) fn to_field(&self) -> String {
        match self {
            Self::Logical(b) => format!("{:>20}", if *b { "T" } else { "F" }),
            Self::Integer(i) => format!("{:>20}", i),
            Self::Real(r) => format!("{:>20}", format_real(*r)),
            Self::String(s) => format!("{:<20}", format!("'{:<8}'", s.replace('\'', "''"))),
        }
    }
}

fn format_real(value: f64) -> String {
    let text = format!("{:E}", value);
    if text.contains('.') || !text.contains('E') {
        text
    } else {
        text.replacen('E', ".0E", 1)
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical(b) => write!(f, "{}", if *b { "T" } else { "F" }),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Real(r) => write!(f, "{}", r),
            Self::String(s) => write!(f, "'{}'", s),
        }
    }
}

/// One 80-byte header record.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCard {
    pub keyword: String,
    pub value: Option<HeaderValue>,
    pub comment: Option<String>,
}

impl HeaderCard {
    pub fn new(keyword: impl Into<String>, value: HeaderValue) -> Self {
        Self {
            keyword: keyword.into(),
            value: Some(value),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn parse(data: &[u8; CARD_SIZE]) -> Result<Self> {
        if !data.is_ascii() {
            return Err(FitsError::InvalidFormat(
                "Non-ASCII byte in header card".to_string(),
            ));
        }
        let card_str = str::from_utf8(data)
            .map_err(|_| FitsError::InvalidFormat("Invalid UTF-8 in header card".to_string()))?;

        let keyword = card_str[0..8].trim().to_string();
        let mut card = HeaderCard {
            keyword,
            value: None,
            comment: None,
        };

        if &card_str[8..10] == "= " {
            card.parse_value_and_comment(&card_str[10..])?;
        } else {
            card.comment = non_empty(card_str[8..].trim());
        }

        Ok(card)
    }

    fn parse_value_and_comment(&mut self, field: &str) -> Result<()> {
        let field = field.trim_start();

        if let Some(quoted) = field.strip_prefix('\'') {
            let (content, rest) = split_quoted(quoted).ok_or_else(|| {
                FitsError::HeaderParse(format!("Unterminated string in {}", self.keyword))
            })?;
            self.value = Some(HeaderValue::String(content.trim_end().to_string()));
            self.comment = rest
                .trim_start()
                .strip_prefix('/')
                .and_then(|c| non_empty(c.trim()));
            return Ok(());
        }

        let (value_part, comment_part) = match field.find('/') {
            Some(pos) => (&field[..pos], Some(&field[pos + 1..])),
            None => (field, None),
        };

        let value_part = value_part.trim();
        if !value_part.is_empty() {
            self.value = Some(HeaderValue::parse(value_part));
        }
        self.comment = comment_part.and_then(|c| non_empty(c.trim()));
        Ok(())
    }

    /// Serialises to exactly 80 ASCII bytes.
    pub fn to_bytes(&self) -> [u8; CARD_SIZE] {
        let mut text = format!("{:<8}", self.keyword);
        if let Some(value) = &self.value {
            text.push_str("= ");
            text.push_str(&value.to_field());
            if let Some(comment) = &self.comment {
                text.push_str(" / ");
                text.push_str(comment);
            }
        } else if let Some(comment) = &self.comment {
            text.push_str(comment);
        }

        let mut out = [b' '; CARD_SIZE];
        for (slot, byte) in out.iter_mut().zip(text.bytes().filter(u8::is_ascii)) {
            *slot = byte;
        }
        out
    }

    pub(crate) fn end() -> [u8; CARD_SIZE] {
        let mut out = [b' '; CARD_SIZE];
        out[..3].copy_from_slice(b"END");
        out
    }
}

/// Splits at the closing quote, unescaping doubled quotes.
fn split_quoted(s: &str) -> Option<(String, &str)> {
    let mut content = String::new();
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\'' {
            if matches!(chars.peek(), Some((_, '\''))) {
                chars.next();
                content.push('\'');
            } else {
                return Some((content, &s[i + 1..]));
            }
        } else {
            content.push(c);
        }
    }
    None
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct Header {
    cards: Vec<HeaderCard>,
    keyword_index: HashMap<String, usize>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a complete header, which must be a whole number of blocks and
    /// contain `END`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() % BLOCK_SIZE != 0 {
            return Err(FitsError::InvalidFormat(
                "Header size must be multiple of 2880 bytes".to_string(),
            ));
        }

        let mut header = Header::new();
        for block in data.chunks_exact(BLOCK_SIZE) {
            if header.parse_block(block)? {
                return Ok(header);
            }
        }
        Err(FitsError::InvalidFormat("Missing END keyword".to_string()))
    }

    /// Appends the cards of one block; returns `true` once `END` is seen.
    pub(crate) fn parse_block(&mut self, block: &[u8]) -> Result<bool> {
        for chunk in block.chunks_exact(CARD_SIZE) {
            let mut card_data = [0u8; CARD_SIZE];
            card_data.copy_from_slice(chunk);

            let card = HeaderCard::parse(&card_data)?;
            if card.keyword == "END" {
                return Ok(true);
            }
            if card.keyword.is_empty() && card.value.is_none() && card.comment.is_none() {
                continue;
            }
            self.push(card);
        }
        Ok(false)
    }

    pub fn push(&mut self, card: HeaderCard) {
        let index = self.cards.len();
        if !card.keyword.is_empty() {
            self.keyword_index.entry(card.keyword.clone()).or_insert(index);
        }
        self.cards.push(card);
    }

    pub fn get(&self, keyword: &str) -> Option<&HeaderValue> {
        self.keyword_index
            .get(keyword)
            .and_then(|&index| self.cards[index].value.as_ref())
    }

    pub fn cards(&self) -> &[HeaderCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn require_integer(&self, keyword: &str) -> Result<i64> {
        let value = self.get(keyword).ok_or_else(|| FitsError::KeywordNotFound {
            keyword: keyword.to_string(),
        })?;
        value.as_integer().ok_or_else(|| FitsError::InvalidKeywordValue {
            keyword: keyword.to_string(),
            value: value.to_string(),
        })
    }

    pub fn real_or(&self, keyword: &str, default: f64) -> Result<f64> {
        match self.get(keyword) {
            None => Ok(default),
            Some(value) => value.as_real().ok_or_else(|| FitsError::InvalidKeywordValue {
                keyword: keyword.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.cards
            .first()
            .filter(|card| card.keyword == "SIMPLE")
            .and_then(|card| card.value.as_ref())
            .and_then(HeaderValue::as_logical)
            .unwrap_or(false)
    }

    pub fn bitpix(&self) -> Result<BitPix> {
        let raw = self.require_integer("BITPIX")?;
        BitPix::from_value(raw).ok_or(FitsError::InvalidBitPix(raw))
    }

    /// Axis lengths in FITS order (`NAXIS1` first).
    pub fn axes(&self) -> Result<Vec<usize>> {
        let naxis = self.require_integer("NAXIS")?;
        if !(0..=999).contains(&naxis) {
            return Err(FitsError::InvalidKeywordValue {
                keyword: "NAXIS".to_string(),
                value: naxis.to_string(),
            });
        }

        (1..=naxis)
            .map(|i| {
                let keyword = format!("NAXIS{}", i);
                let len = self.require_integer(&keyword)?;
                usize::try_from(len).map_err(|_| FitsError::InvalidKeywordValue {
                    keyword,
                    value: len.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> [u8; CARD_SIZE] {
        let mut data = [b' '; CARD_SIZE];
        data[..text.len()].copy_from_slice(text.as_bytes());
        data
    }

    #[test]
    fn test_header_card_parse_logical() {
        let parsed =
            HeaderCard::parse(&card("SIMPLE  =                    T / Standard FITS format")).unwrap();
        assert_eq!(parsed.keyword, "SIMPLE");
        assert_eq!(parsed.value, Some(HeaderValue::Logical(true)));
        assert_eq!(parsed.comment.as_deref(), Some("Standard FITS format"));
    }

    #[test]
    fn test_header_card_parse_numbers() {
        let bitpix = HeaderCard::parse(&card("BITPIX  =                  -32 / Bits per pixel")).unwrap();
        assert_eq!(bitpix.value, Some(HeaderValue::Integer(-32)));

        let bscale = HeaderCard::parse(&card("BSCALE  =                1.5D0")).unwrap();
        assert_eq!(bscale.value, Some(HeaderValue::Real(1.5)));
        assert_eq!(bscale.comment, None);
    }

    #[test]
    fn test_header_card_parse_string_with_slash_and_quote() {
        let parsed =
            HeaderCard::parse(&card("OBJECT  = 'M31 / It''s big  '   / Target object")).unwrap();
        assert_eq!(parsed.value, Some(HeaderValue::String("M31 / It's big".to_string())));
        assert_eq!(parsed.comment.as_deref(), Some("Target object"));
    }

    #[test]
    fn test_header_card_unterminated_string() {
        let err = HeaderCard::parse(&card("OBJECT  = 'M31")).unwrap_err();
        assert!(matches!(err, FitsError::HeaderParse(_)));
    }

    #[test]
    fn test_header_card_commentary() {
        let parsed = HeaderCard::parse(&card("COMMENT   stacked from 1000 frames")).unwrap();
        assert_eq!(parsed.keyword, "COMMENT");
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.comment.as_deref(), Some("stacked from 1000 frames"));
    }

    #[test]
    fn test_header_card_rejects_non_ascii() {
        let mut data = card("OBJECT  = 'x'");
        data[12] = 0xC3;
        assert!(matches!(
            HeaderCard::parse(&data),
            Err(FitsError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_header_card_bytes_reparse() {
        let cards = [
            HeaderCard::new("NAXIS1", HeaderValue::Integer(200)).with_comment("Axis 1 size"),
            HeaderCard::new("BZERO", HeaderValue::Real(32768.0)),
            HeaderCard::new("OBSERVER", HeaderValue::String("O'Brien".to_string())),
        ];
        for original in cards {
            let reparsed = HeaderCard::parse(&original.to_bytes()).unwrap();
            assert_eq!(reparsed, original);
        }
    }

    #[test]
    fn test_header_from_bytes_requires_end() {
        let mut block = vec![b' '; BLOCK_SIZE];
        block[..CARD_SIZE].copy_from_slice(&card("SIMPLE  =                    T"));
        let err = Header::from_bytes(&block).unwrap_err();
        assert!(err.to_string().contains("Missing END"));

        block[CARD_SIZE..2 * CARD_SIZE].copy_from_slice(&HeaderCard::end());
        let header = Header::from_bytes(&block).unwrap();
        assert!(header.is_primary());
        assert_eq!(header.len(), 1);
    }

    #[test]
    fn test_header_from_bytes_rejects_partial_block() {
        assert!(matches!(
            Header::from_bytes(&[b' '; 100]),
            Err(FitsError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_header_lookups() {
        let mut header = Header::new();
        header.push(HeaderCard::new("SIMPLE", HeaderValue::Logical(true)));
        header.push(HeaderCard::new("BITPIX", HeaderValue::Integer(16)));
        header.push(HeaderCard::new("NAXIS", HeaderValue::Integer(2)));
        header.push(HeaderCard::new("NAXIS1", HeaderValue::Integer(4)));
        header.push(HeaderCard::new("NAXIS2", HeaderValue::Integer(3)));
        header.push(HeaderCard::new("BZERO", HeaderValue::Integer(32768)));

        assert_eq!(header.bitpix().unwrap(), BitPix::I16);
        assert_eq!(header.axes().unwrap(), vec![4, 3]);
        assert_eq!(header.real_or("BZERO", 0.0).unwrap(), 32768.0);
        assert_eq!(header.real_or("BSCALE", 1.0).unwrap(), 1.0);
        assert!(matches!(
            header.require_integer("EXPTIME"),
            Err(FitsError::KeywordNotFound { .. })
        ));
    }

    #[test]
    fn test_bitpix_values() {
        for (input, expected) in [
            (8, BitPix::U8),
            (16, BitPix::I16),
            (32, BitPix::I32),
            (64, BitPix::I64),
            (-32, BitPix::F32),
            (-64, BitPix::F64),
        ] {
            assert_eq!(BitPix::from_value(input), Some(expected));
            assert_eq!(expected.value(), input);
        }
        for invalid in [0, 1, -8, 24, -16] {
            assert_eq!(BitPix::from_value(invalid), None);
        }
    }
}
