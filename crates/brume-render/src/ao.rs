//! Ambient occlusion attenuation. The mesher buckets each vertex's
//! occlusion into 2 bits; shading maps the bucket through this fixed table.
//! Bucket 0 is the darkest (a fully tucked-in corner), bucket 3 fully open.

/// Intensity multiplier per ambient-occlusion bucket. Compile-time
/// constant, mirrored into the shader preamble.
pub const AO_TABLE: [f32; 4] = [0.1, 0.25, 0.5, 1.0];

/// CPU mirror of the shader lookup. The index is masked to the field
/// width, never validated against the table beyond that.
pub fn ao_weight(ao_index: u32) -> f32 {
    AO_TABLE[(ao_index & 0x3) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_monotonic() {
        for pair in AO_TABLE.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_open_bucket_is_identity() {
        assert_eq!(ao_weight(3), 1.0);
    }

    #[test]
    fn test_brighter_bucket_yields_brighter_output() {
        let sample = 0.8;
        assert!(sample * ao_weight(3) > sample * ao_weight(0));
    }

    #[test]
    fn test_index_is_masked() {
        assert_eq!(ao_weight(4), ao_weight(0));
        assert_eq!(ao_weight(7), ao_weight(3));
    }
}
