//! 3x3 matrix helpers shared by the color transforms.

pub(crate) type Mat3 = [[f64; 3]; 3];

#[inline]
pub(crate) fn mul(m: &Mat3, v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

#[cfg(test)]
pub(crate) fn product(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0; 3]; 3];
    for r in 0..3 {
        for c in 0..3 {
            out[r][c] = (0..3).map(|k| a[r][k] * b[k][c]).sum();
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn assert_identity(m: &Mat3, tol: f64) {
    for r in 0..3 {
        for c in 0..3 {
            let expected = if r == c { 1.0 } else { 0.0 };
            assert!(
                (m[r][c] - expected).abs() < tol,
                "entry ({r},{c}) = {} is not identity",
                m[r][c]
            );
        }
    }
}
