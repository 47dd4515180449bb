//! Minimal NPY / NPZ loader.
//!
//! Supports the subset of the NumPy array format the style presets use:
//! NPY format versions 1.0 and 2.0, `float32` dtype, C-contiguous layout,
//! any number of dimensions. NPZ files are ZIP archives whose members are
//! `.npy` files; the member name minus its extension is the array name.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{Error, Result};

/// A loaded array: shape + flat f32 data in row-major (C) order.
pub struct NpyArray {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Parse a raw `.npy` byte buffer into shape and flat f32 data.
pub fn parse_npy(data: &[u8]) -> Result<(Vec<usize>, Vec<f32>)> {
    // Magic: 6 bytes "\x93NUMPY"
    if data.len() < 10 || &data[..6] != b"\x93NUMPY" {
        return Err(Error::Parse("not a valid NPY file (bad magic)".into()));
    }

    let major = data[6];
    let minor = data[7];

    // Header length: 2 bytes (v1) or 4 bytes (v2), little-endian.
    let (header_len, header_start) = match (major, minor) {
        (1, _) => (u16::from_le_bytes([data[8], data[9]]) as usize, 10),
        (2, _) => {
            if data.len() < 12 {
                return Err(Error::Parse("NPY v2 file too short".into()));
            }
            let len = u32::from_le_bytes([data[8], data[9], data[10], data[11]]) as usize;
            (len, 12)
        }
        _ => {
            return Err(Error::Parse(format!("unsupported NPY version {major}.{minor}")));
        }
    };

    let header_end = header_start + header_len;
    if data.len() < header_end {
        return Err(Error::Parse("NPY file truncated in header".into()));
    }
    let header = std::str::from_utf8(&data[header_start..header_end])
        .map_err(|_| Error::Parse("NPY header is not valid UTF-8".into()))?;

    let dtype = header_field(header, "descr")
        .ok_or_else(|| Error::Parse("NPY header missing 'descr'".into()))?;
    let dtype = dtype.trim().trim_matches('\'').trim_matches('"');
    if !matches!(dtype, "<f4" | "=f4" | "|f4" | ">f4") {
        return Err(Error::Parse(format!("unsupported dtype '{dtype}', only float32 is supported")));
    }
    let big_endian = dtype.starts_with('>');

    let fortran = header_field(header, "fortran_order")
        .unwrap_or("False")
        .trim()
        .to_ascii_lowercase();
    if fortran == "true" {
        return Err(Error::Parse("Fortran-order arrays are not supported".into()));
    }

    let shape_str = header_field(header, "shape")
        .ok_or_else(|| Error::Parse("NPY header missing 'shape'".into()))?;
    let shape = parse_shape(shape_str.trim())?;

    let n_elements: usize = shape.iter().product();
    let data_bytes = &data[header_end..];
    if data_bytes.len() < n_elements * 4 {
        return Err(Error::Parse(format!(
            "NPY data section too short: expected {} bytes, got {}",
            n_elements * 4,
            data_bytes.len()
        )));
    }

    let values: Vec<f32> = data_bytes[..n_elements * 4]
        .chunks_exact(4)
        .map(|b| {
            let arr = [b[0], b[1], b[2], b[3]];
            if big_endian {
                f32::from_be_bytes(arr)
            } else {
                f32::from_le_bytes(arr)
            }
        })
        .collect();

    Ok((shape, values))
}

/// Extract a field value from the Python-literal dict header string.
fn header_field<'a>(header: &'a str, field: &str) -> Option<&'a str> {
    let key_sq = format!("'{field}':");
    let key_dq = format!("\"{field}\":");

    let start = header
        .find(key_sq.as_str())
        .map(|p| p + key_sq.len())
        .or_else(|| header.find(key_dq.as_str()).map(|p| p + key_dq.len()))?;

    let rest = header[start..].trim_start();

    if rest.starts_with('(') {
        let end = rest.find(')')?;
        Some(&rest[..end + 1])
    } else if rest.starts_with('\'') || rest.starts_with('"') {
        let quote = rest.chars().next()?;
        let inner = &rest[1..];
        let end = inner.find(quote)?;
        Some(&inner[..end])
    } else {
        let end = rest.find([',', '}']).unwrap_or(rest.len());
        Some(rest[..end].trim())
    }
}

/// Parse a Python-style shape tuple like `(511, 1, 256)` or `(100,)` or `()`.
fn parse_shape(s: &str) -> Result<Vec<usize>> {
    let inner = s.trim_start_matches('(').trim_end_matches(')');
    if inner.trim().is_empty() {
        return Ok(vec![]);
    }
    inner
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<usize>()
                .map_err(|_| Error::Parse(format!("bad shape dimension: '{t}'")))
        })
        .collect()
}

/// Load a single `.npy` file.
pub fn load_npy(path: &Path) -> Result<NpyArray> {
    let bytes = std::fs::read(path)?;
    let (shape, data) = parse_npy(&bytes)?;
    Ok(NpyArray { shape, data })
}

/// Load an NPZ archive and return all member arrays indexed by name.
pub fn load_npz(path: &Path) -> Result<HashMap<String, NpyArray>> {
    let file = std::fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| Error::Parse(format!("cannot open ZIP archive {}: {e}", path.display())))?;

    let mut arrays = HashMap::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::Parse(format!("cannot read ZIP entry {i}: {e}")))?;
        let name = entry.name().trim_end_matches(".npy").to_string();

        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buf)?;

        let (shape, data) = parse_npy(&buf)?;
        arrays.insert(name, NpyArray { shape, data });
    }

    Ok(arrays)
}

#[cfg(test)]
pub(crate) fn make_npy(shape: &[usize], values: &[f32]) -> Vec<u8> {
    let header_str = format!(
        "{{'descr': '<f4', 'fortran_order': False, 'shape': ({},), }}",
        shape.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
    );
    // Header block is 10 bytes of prefix plus the header padded with spaces
    // to a 64-byte multiple and terminated by \n.
    let raw_len = header_str.len() + 1;
    let padded_len = raw_len.div_ceil(64) * 64;
    let mut header = header_str;
    for _ in 0..padded_len - raw_len {
        header.push(' ');
    }
    header.push('\n');

    let mut buf = Vec::new();
    buf.extend_from_slice(b"\x93NUMPY");
    buf.push(1); // major
    buf.push(0); // minor
    buf.extend_from_slice(&(header.len() as u16).to_le_bytes());
    buf.extend_from_slice(header.as_bytes());
    for &v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf
}
