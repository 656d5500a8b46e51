//! Annex B byte stream handling shared by H.264 and H.265.
//!
//! NAL units are delimited by start codes:
//! - 4-byte: `0x00 0x00 0x00 0x01`
//! - 3-byte: `0x00 0x00 0x01`

/// 4-byte start code used when rebuilding access units.
pub const START_CODE: [u8; 4] = [0, 0, 0, 1];

/// Extract NAL units from an Annex B bitstream.
///
/// Returns slices between start codes, excluding the start codes
/// themselves. Each start code's length is tracked so boundaries stay
/// correct when 3-byte and 4-byte codes are mixed.
pub fn extract_nal_units(data: &[u8]) -> Vec<&[u8]> {
    let mut nal_units = Vec::new();
    let mut i = 0usize;

    // (nal_data_start_index, start_code_length)
    let mut start_entries: Vec<(usize, usize)> = Vec::new();

    while i < data.len() {
        if i + 3 < data.len() && data[i..i + 4] == [0, 0, 0, 1] {
            start_entries.push((i + 4, 4));
            i += 4;
        } else if i + 2 < data.len() && data[i..i + 3] == [0, 0, 1] {
            start_entries.push((i + 3, 3));
            i += 3;
        } else {
            i += 1;
        }
    }

    for (idx, &(start, _)) in start_entries.iter().enumerate() {
        let end = if idx + 1 < start_entries.len() {
            let (next_start, next_sc_len) = start_entries[idx + 1];
            next_start - next_sc_len
        } else {
            data.len()
        };

        if start < end {
            nal_units.push(&data[start..end]);
        }
    }

    nal_units
}
