use crate::foundation::math::mul_div255_u8;

/// One RGBA8 pixel.
pub(crate) type Rgba8 = [u8; 4];

pub(crate) fn premultiply(px: Rgba8) -> Rgba8 {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        mul_div255_u8(u16::from(px[0]), a),
        mul_div255_u8(u16::from(px[1]), a),
        mul_div255_u8(u16::from(px[2]), a),
        px[3],
    ]
}

pub(crate) fn unpremultiply(px: Rgba8) -> Rgba8 {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

/// Premultiplied source-over.
pub(crate) fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over on straight-alpha pixels.
pub(crate) fn blend(dst: Rgba8, src: Rgba8) -> Rgba8 {
    match (dst[3], src[3]) {
        (_, 0) => dst,
        (_, 255) | (0, _) => src,
        _ => unpremultiply(over(premultiply(dst), premultiply(src))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
