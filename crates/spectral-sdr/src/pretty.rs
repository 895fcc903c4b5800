//! Human-readable rendering of frequency encodings.

use ndarray::ArrayView2;

/// Render `encoding` as one `Freq bin i: [...]` line per frequency bin.
///
/// Bits past `num_bins * bin_width` are ignored. Returns `None` if
/// `encoding` is shorter than that.
pub fn format_encoding(encoding: &[u8], num_bins: usize, bin_width: usize) -> Option<String> {
    let bits = encoding.get(..num_bins * bin_width)?;
    let bins = ArrayView2::from_shape((num_bins, bin_width), bits).ok()?;

    Some(
        bins.outer_iter()
            .enumerate()
            .map(|(i, row)| {
                let bits: Vec<String> = row.iter().map(|b| b.to_string()).collect();
                format!("Freq bin {}: [{}]\n", i, bits.join(" "))
            })
            .collect(),
    )
}
