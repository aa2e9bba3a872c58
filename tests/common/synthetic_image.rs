/// Generates an RGB checkerboard in [0, 1], channel-interleaved.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> Vec<f64> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let dark = [0.12, 0.10, 0.35];
    let light = [0.86, 0.80, 0.20];
    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let cx = x / cell;
            let cy = y / cell;
            let px = if (cx + cy) & 1 == 0 { dark } else { light };
            img.extend_from_slice(&px);
        }
    }
    img
}

/// Single-channel image with two flat blobs of value `peak` on a zero background.
pub fn two_blobs(width: usize, height: usize, radius: f64, peak: f64) -> Vec<f64> {
    let centers = [
        (width as f64 * 0.25, height as f64 * 0.5),
        (width as f64 * 0.75, height as f64 * 0.5),
    ];
    let mut img = vec![0.0; width * height];
    for y in 0..height {
        for x in 0..width {
            let inside = centers.iter().any(|&(cx, cy)| {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                (dx * dx + dy * dy).sqrt() <= radius
            });
            if inside {
                img[y * width + x] = peak;
            }
        }
    }
    img
}
