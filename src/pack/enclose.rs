use super::{Circle, Lcg};

const WEAK_EPSILON: f64 = 1e-9;

/// Smallest circle enclosing every input circle (randomized Welzl over a
/// shuffled copy, basis of at most three circles).
pub(super) fn enclose(circles: &[Circle], random: &mut Lcg) -> Circle {
    let mut shuffled = circles.to_vec();
    shuffle(&mut shuffled, random);

    let mut basis: Vec<Circle> = Vec::with_capacity(3);
    let mut enclosing: Option<Circle> = None;
    let mut index = 0;

    while index < shuffled.len() {
        let candidate = shuffled[index];
        if let Some(current) = enclosing
            && encloses_weak(&current, &candidate)
        {
            index += 1;
            continue;
        }

        match extend_basis(&basis, candidate) {
            Some(next) => basis = next,
            None => {
                // Numerical dead end: grow the current circle around the
                // candidate and keep going.
                let grown = enclosing
                    .map(|current| enclose_basis_2(&current, &candidate))
                    .unwrap_or(candidate);
                basis = vec![grown];
            }
        }
        enclosing = Some(enclose_basis(&basis));
        index = 0;
    }

    enclosing.unwrap_or_default()
}

fn shuffle(circles: &mut [Circle], random: &mut Lcg) {
    let mut remaining = circles.len();
    while remaining > 0 {
        let pick = (random.next_f64() * remaining as f64) as usize;
        remaining -= 1;
        circles.swap(remaining, pick.min(remaining));
    }
}

fn extend_basis(basis: &[Circle], point: Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(&point, basis) {
        return Some(vec![point]);
    }

    for member in basis {
        if encloses_not(&point, member) && encloses_weak_all(&enclose_basis_2(member, &point), basis)
        {
            return Some(vec![*member, point]);
        }
    }

    for i in 0..basis.len().saturating_sub(1) {
        for j in (i + 1)..basis.len() {
            let (a, b) = (&basis[i], &basis[j]);
            if encloses_not(&enclose_basis_2(a, b), &point)
                && encloses_not(&enclose_basis_2(a, &point), b)
                && encloses_not(&enclose_basis_2(b, &point), a)
                && encloses_weak_all(&enclose_basis_3(a, b, &point), basis)
            {
                return Some(vec![*a, *b, point]);
            }
        }
    }

    None
}

fn encloses_not(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * WEAK_EPSILON;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: &Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|member| encloses_weak(a, member))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_basis_2(a, b),
        [a, b, c] => enclose_basis_3(a, b, c),
        _ => Circle::default(),
    }
}

fn enclose_basis_2(a: &Circle, b: &Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    if l <= f64::EPSILON {
        return if a.r >= b.r { *a } else { *b };
    }

    Circle {
        x: (a.x + b.x + x21 / l * r21) / 2.0,
        y: (a.y + b.y + y21 / l * r21) / 2.0,
        r: (l + a.r + b.r) / 2.0,
    }
}

fn enclose_basis_3(a: &Circle, b: &Circle, c: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);

    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });

    Circle {
        x: x1 + xa + xb * r,
        y: y1 + ya + yb * r,
        r,
    }
}
