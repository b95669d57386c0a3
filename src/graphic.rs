// Picture -> paint layers.
// 1) decode the picture into a rows x cols grid of colors
// 2) snap every cell to its nearest palette color
// 3) one boolean mask per palette color, sparsest first

use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::error::Error;
use crate::types::Rgba;

/// Below this single-channel delta (0..255 scale) the single-channel pick
/// overrides the average pick.
pub const SINGLE_CHANNEL_THRESHOLD: u8 = 10;

/// rows (top to bottom) of cells (left to right)
pub type ColorGrid = Vec<Vec<Rgba>>;

/// Fixed, ordered set of paint colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(Vec<Rgba>);

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self(colors)
    }

    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, Error> {
        hex.iter()
            .map(|h| Rgba::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mask of the cells that should be painted `color`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLayer {
    pub color: Rgba,
    /// same rows x cols as the source grid
    pub data: Vec<Vec<bool>>,
    /// true cells / row count
    pub density: f32,
}

/// Open a picture from disk. When `max_side` is given, larger pictures are
/// shrunk (nearest neighbour, aspect kept) so every pixel stays a visible cell.
pub fn load_image(path: &Path, max_side: Option<u32>) -> Result<RgbaImage, Error> {
    let img = image::open(path)
        .map_err(|source| Error::ImageLoad { path: path.to_path_buf(), source })?
        .to_rgba8();

    let (w, h) = img.dimensions();
    match max_side {
        Some(max) if max > 0 && w.max(h) > max => {
            let scale = max as f32 / w.max(h) as f32;
            let nw = ((w as f32 * scale).round() as u32).max(1);
            let nh = ((h as f32 * scale).round() as u32).max(1);
            log::info!("downsampling {}x{} -> {}x{}", w, h, nw, nh);
            Ok(imageops::resize(&img, nw, nh, FilterType::Nearest))
        }
        _ => Ok(img),
    }
}

/// Group a decoded picture into rows x cols of colors.
pub fn image_to_color_arr(img: &RgbaImage) -> ColorGrid {
    img.rows()
        .map(|row| row.map(|p| Rgba::rgba(p[0], p[1], p[2], p[3])).collect())
        .collect()
}

/// Same as `image_to_color_arr`, for a raw row-major RGBA buffer (4 bytes per pixel).
pub fn pixels_to_color_arr(width: usize, height: usize, rgba: &[u8]) -> Result<ColorGrid, Error> {
    let want = width * height * 4;
    if rgba.len() < want {
        return Err(Error::PixelBuffer { got: rgba.len(), want });
    }

    Ok((0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let i = (y * width + x) * 4;
                    Rgba::rgba(rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3])
                })
                .collect()
        })
        .collect())
}

/// Index of the palette entry nearest to `pixel`, or `None` for an empty palette.
///
/// Nearest by average channel delta is consistent to the point of being sterile;
/// nearest by single closest channel is chaotic. The average pick wins unless the
/// two disagree and the single-channel delta is under [`SINGLE_CHANNEL_THRESHOLD`].
/// Both picks are deterministic: a random tie-break could leave a cell claimed by
/// neither layer.
pub fn nearest_color(pixel: Rgba, palette: &Palette) -> Option<usize> {
    let deltas: Vec<[u8; 3]> = palette
        .colors()
        .iter()
        .map(|c| [c.r.abs_diff(pixel.r), c.g.abs_diff(pixel.g), c.b.abs_diff(pixel.b)])
        .collect();

    // First index wins ties on both criteria.
    let mut by_avg = None::<(usize, u16)>;
    let mut by_min = None::<(usize, u8)>;
    for (i, d) in deltas.iter().enumerate() {
        // sum instead of mean: same ordering, no float compare
        let sum = d.iter().map(|&v| v as u16).sum::<u16>();
        if by_avg.is_none_or(|(_, best)| sum < best) {
            by_avg = Some((i, sum));
        }
        let single = d.iter().copied().min().unwrap_or(u8::MAX);
        if by_min.is_none_or(|(_, best)| single < best) {
            by_min = Some((i, single));
        }
    }

    let (avg_idx, _) = by_avg?;
    let (min_idx, min_delta) = by_min?;

    // Palette entries are compared by value, so duplicate colors never "disagree".
    let colors = palette.colors();
    if colors[min_idx] != colors[avg_idx] && min_delta < SINGLE_CHANNEL_THRESHOLD {
        return Some(min_idx);
    }
    Some(avg_idx)
}

/// Split a color grid into one boolean layer per palette color, sparsest first.
pub fn stratify(grid: &ColorGrid, palette: &Palette) -> Vec<BooleanLayer> {
    // Resolve every cell once instead of once per palette color.
    let nearest: Vec<Vec<Option<usize>>> = grid
        .iter()
        .map(|row| row.iter().map(|&c| nearest_color(c, palette)).collect())
        .collect();

    let rows = grid.len();
    let mut layers: Vec<BooleanLayer> = palette
        .colors()
        .iter()
        .enumerate()
        .map(|(pi, &color)| {
            let data: Vec<Vec<bool>> = nearest
                .iter()
                .map(|row| row.iter().map(|&n| n.is_some_and(|i| palette.colors()[i] == color)).collect())
                .collect();

            let filled = data.iter().flatten().filter(|&&b| b).count();
            // Normalized by row count, not cell count.
            let density = if rows == 0 { 0.0 } else { filled as f32 / rows as f32 };
            log::debug!("layer {} {}: {} cells, density {:.2}", pi, color.to_hex(), filled, density);

            BooleanLayer { color, data, density }
        })
        .collect();

    // stable: equal densities keep palette order
    layers.sort_by(|a, b| a.density.total_cmp(&b.density));
    layers
}
