// ============================================================================
// MASK BORDER — outline extraction and border-only smoothing
// ============================================================================

use crate::canvas::{Bounds, Mask};

/// Flat indices of the mask outline: included cells with at least one
/// excluded 4-neighbor. Cells on the image edge count as bordering the
/// (excluded) outside.
///
/// The scan is confined to the mask bounding box; an empty mask yields an
/// empty list.
pub fn border_indices(mask: &Mask) -> Vec<usize> {
    let mut out = Vec::new();
    let b = mask.bounds;
    if b.is_empty() {
        return out;
    }
    let w = mask.width;
    let h = mask.height;
    let stride = w as usize;
    for y in b.min_y..=b.max_y {
        let row = y as usize * stride;
        for x in b.min_x..=b.max_x {
            if mask.data[row + x as usize] == 0 {
                continue;
            }
            let at_edge = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            if at_edge
                || mask.data[row + x as usize - 1] == 0
                || mask.data[row + x as usize + 1] == 0
                || mask.data[row - stride + x as usize] == 0
                || mask.data[row + stride + x as usize] == 0
            {
                out.push(row + x as usize);
            }
        }
    }
    out
}

/// Smooth only the mask's edge-transition cells, leaving the interior
/// untouched.
///
/// A transition cell is any cell whose value differs from a 4-neighbor —
/// included cells facing out and excluded cells facing in, so the edge can
/// both erode and grow by one ring. Each transition cell is re-decided by a
/// gaussian-weighted average of inclusion over a `(2·radius+1)²` window
/// (σ = radius/3, weights renormalized at image edges): the cell ends up
/// included iff the local average reaches 0.5.
///
/// `prior` cells count as included while sampling, which keeps the smoothed
/// edge seamless against the selection accumulated earlier in the gesture.
///
/// All work stays inside the bounding box expanded by `radius`; the returned
/// mask's box reflects the possibly-shifted border.
pub fn blur_border(mask: Mask, radius: u32, prior: Option<&Mask>) -> Mask {
    if mask.is_empty() || radius == 0 {
        return mask;
    }
    let w = mask.width;
    let h = mask.height;
    let stride = w as usize;
    debug_assert!(prior.is_none_or(|p| p.width == w && p.height == h));

    // Transition cells all lie within one cell of the current box.
    let near = mask.bounds.expanded(1, w, h);
    let mut transitions: Vec<(u32, u32)> = Vec::new();
    for y in near.min_y..=near.max_y {
        let row = y as usize * stride;
        for x in near.min_x..=near.max_x {
            let v = mask.data[row + x as usize];
            let differs = (x > 0 && mask.data[row + x as usize - 1] != v)
                || (x + 1 < w && mask.data[row + x as usize + 1] != v)
                || (y > 0 && mask.data[row - stride + x as usize] != v)
                || (y + 1 < h && mask.data[row + stride + x as usize] != v);
            if differs {
                transitions.push((x, y));
            }
        }
    }
    if transitions.is_empty() {
        return mask;
    }

    let kernel = gauss_kernel(radius);
    let r = radius as i32;
    let d = 2 * r + 1;

    let included = |x: u32, y: u32| -> bool {
        let i = y as usize * stride + x as usize;
        mask.data[i] != 0 || prior.is_some_and(|p| p.data[i] != 0)
    };

    // Decide every transition cell against the *input* mask, then apply, so
    // the result does not depend on cell visit order.
    let mut changes: Vec<(usize, u8)> = Vec::new();
    for &(cx, cy) in &transitions {
        let mut value = 0.0f32;
        let mut weight = 0.0f32;
        for ky in 0..d {
            let sy = cy as i32 + ky - r;
            if sy < 0 || sy >= h as i32 {
                continue;
            }
            for kx in 0..d {
                let sx = cx as i32 + kx - r;
                if sx < 0 || sx >= w as i32 {
                    continue;
                }
                let kw = kernel[(ky * d + kx) as usize];
                weight += kw;
                if included(sx as u32, sy as u32) {
                    value += kw;
                }
            }
        }
        let smoothed = if weight > 0.0 && value / weight >= 0.5 {
            1
        } else {
            0
        };
        let idx = cy as usize * stride + cx as usize;
        if mask.data[idx] != smoothed {
            changes.push((idx, smoothed));
        }
    }

    if changes.is_empty() {
        return mask;
    }
    let window = mask.bounds.expanded(radius, w, h);
    let mut out = mask;
    for (idx, v) in changes {
        out.data[idx] = v;
    }
    out.recompute_bounds(window);
    out
}

/// `(2·radius+1)²` gaussian kernel, σ = radius/3, normalized to sum 1.
fn gauss_kernel(radius: u32) -> Vec<f32> {
    let r = radius as i32;
    let d = 2 * r + 1;
    let sigma = (radius as f32 / 3.0).max(0.5);
    let s2 = 2.0 * sigma * sigma;
    let mut weights = Vec::with_capacity((d * d) as usize);
    let mut total = 0.0f32;
    for y in -r..=r {
        for x in -r..=r {
            let r2 = (x * x + y * y) as f32;
            let kw = (-r2 / s2).exp();
            total += kw;
            weights.push(kw);
        }
    }
    for kw in &mut weights {
        *kw /= total;
    }
    weights
}
