use super::enclose::enclose;
use super::{Circle, Lcg};

const NONE: usize = usize::MAX;

/// Places `circles` side by side without overlap (radii are kept, positions
/// are rewritten) and returns the radius of the circle enclosing them all.
/// The enclosing circle ends up centered on the origin.
pub(super) fn pack_siblings(circles: &mut [Circle], random: &mut Lcg) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }

    let (first, second) = (circles[1], circles[0]);
    place(&first, &second, &mut circles[2]);

    // Front chain as a circular doubly linked list over circle indices.
    let mut next = vec![NONE; n];
    let mut previous = vec![NONE; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    previous[1] = 0;
    next[1] = 2;
    previous[2] = 1;
    next[2] = 0;
    previous[0] = 2;

    let mut i = 3;
    'pack: while i < n {
        let (anchor_a, anchor_b) = (circles[a], circles[b]);
        place(&anchor_a, &anchor_b, &mut circles[i]);
        let c = i;

        // Closest intersecting circle on the front chain, searching ahead of
        // b and behind a by accumulated radius.
        let mut j = next[b];
        let mut k = previous[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(&circles[j], &circles[c]) {
                    b = j;
                    next[a] = b;
                    previous[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(&circles[k], &circles[c]) {
                    a = k;
                    next[a] = b;
                    previous[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = previous[k];
            }
            if j == next[k] {
                break;
            }
        }

        previous[c] = a;
        next[c] = b;
        next[a] = c;
        previous[b] = c;
        b = c;

        // Pick the chain pair closest to the centroid as the next anchor.
        let mut best = score(circles, a, next[a]);
        let mut cursor = next[c];
        while cursor != b {
            let candidate = score(circles, cursor, next[cursor]);
            if candidate < best {
                a = cursor;
                best = candidate;
            }
            cursor = next[cursor];
        }
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut cursor = next[b];
    while cursor != b {
        chain.push(circles[cursor]);
        cursor = next[cursor];
    }
    let enclosing = enclose(&chain, random);

    for circle in circles.iter_mut() {
        circle.x -= enclosing.x;
        circle.y -= enclosing.y;
    }
    enclosing.r
}

/// Positions `c` tangent to both `a` and `b`.
fn place(b: &Circle, a: &Circle, c: &mut Circle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;

    if d2 > 0.0 {
        let a2 = (a.r + c.r).powi(2);
        let b2 = (b.r + c.r).powi(2);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[Circle], a: usize, b: usize) -> f64 {
    let (a, b) = (&circles[a], &circles[b]);
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
