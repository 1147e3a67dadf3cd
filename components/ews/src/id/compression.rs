use super::IdError;

/// Largest decoded identifier body accepted by the decompressor.
pub const MAX_DECOMPRESSED_LEN: usize = 383;

const MAX_RUN: usize = u8::MAX as usize + 2;

/// Run-length encodes `input`. A run is written as the byte twice followed
/// by the number of additional repetitions. Returns `None` when the
/// encoded form would not be shorter than the input.
pub fn compress(input: &[u8]) -> Option<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len());
    let mut run_start = 0;

    while run_start < input.len() {
        let byte = input[run_start];
        let max_run = MAX_RUN.min(input.len() - run_start);
        let mut run_len = 1;
        while run_len < max_run && input[run_start + run_len] == byte {
            run_len += 1;
        }

        output.push(byte);
        if run_len > 1 {
            output.push(byte);
            output.push((run_len - 2) as u8);
        }
        if output.len() >= input.len() {
            return None;
        }

        run_start += run_len;
    }

    Some(output)
}

pub fn decompress(input: &[u8], max_len: usize) -> Result<Vec<u8>, IdError> {
    let mut output = Vec::with_capacity(input.len().min(max_len));
    let mut pos = 0;

    while pos < input.len() {
        let byte = input[pos];
        if pos + 1 == input.len() || input[pos + 1] != byte {
            output.push(byte);
            pos += 1;
        } else {
            let run_len = *input.get(pos + 2).ok_or(IdError::Truncated)? as usize + 2;
            output.extend(std::iter::repeat(byte).take(run_len));
            pos += 3;
        }

        if output.len() > max_len {
            return Err(IdError::TooLong);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use crate::id::IdError;

    use super::{compress, decompress, MAX_DECOMPRESSED_LEN};

    #[test]
    fn run_length_encoding() {
        let input = [7u8, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 3];
        let compressed = compress(&input).unwrap();
        assert_eq!(compressed, vec![7, 0, 0, 6, 1, 2, 2, 0, 3]);
        assert_eq!(
            decompress(&compressed, MAX_DECOMPRESSED_LEN).unwrap(),
            input.to_vec()
        );

        // Incompressible input
        assert_eq!(compress(&[1, 2, 3, 4]), None);
        assert_eq!(compress(&[1, 1]), None);

        // Runs longer than a single count byte can hold
        let input = vec![9u8; 300];
        let compressed = compress(&input).unwrap();
        assert_eq!(compressed, vec![9, 9, 255, 9, 9, 41]);
        assert_eq!(decompress(&compressed, MAX_DECOMPRESSED_LEN).unwrap(), input);
    }

    #[test]
    fn malformed_input() {
        assert_eq!(decompress(&[5, 5], MAX_DECOMPRESSED_LEN), Err(IdError::Truncated));
        assert_eq!(
            decompress(&[5, 5, 255, 5, 5, 255], MAX_DECOMPRESSED_LEN),
            Err(IdError::TooLong)
        );
        assert_eq!(decompress(&[5, 5, 0], 2).unwrap(), vec![5, 5]);
    }
}
