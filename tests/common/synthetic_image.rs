use p1x::{PixelBuffer, MASK_BLACK, MASK_WHITE};

/// Deterministic pseudo-random RGBA image (xorshift), with `pad` extra
/// bytes at the end of every row.
pub fn noise_rgba(width: usize, height: usize, pad: usize, seed: u32) -> PixelBuffer {
    let stride = width * 4 + pad;
    let mut state = seed.max(1);
    let mut data = Vec::with_capacity(stride * height);
    for _ in 0..height {
        for _ in 0..width * 4 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            data.push((state >> 24) as u8);
        }
        data.extend(std::iter::repeat(0xAB).take(pad));
    }
    PixelBuffer::from_raw(width, height, stride, data).expect("valid synthetic layout")
}

/// Mask with white even rows and black odd rows.
pub fn striped_mask(width: usize, height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let color = if y % 2 == 0 { MASK_WHITE } else { MASK_BLACK };
        for _ in 0..width {
            data.extend_from_slice(&color);
        }
    }
    PixelBuffer::from_raw(width, height, width * 4, data).expect("valid mask layout")
}
