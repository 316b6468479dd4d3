use super::EmbeddedRK;

/// Bogacki-Shampine 3(2) embedded pair, 4 stages with FSAL.
///
/// Cheap per step; suited to loose tolerances.
///
/// > P. Bogacki and L. F. Shampine, "A 3(2) pair of Runge-Kutta formulas,"
/// > *Appl. Math. Lett.*, vol. 2, no. 4, pp. 321–325, 1989.
pub struct BogackiShampine32;

impl EmbeddedRK<4> for BogackiShampine32 {
    const A: [[f64; 4]; 4] = [
        [0.0, 0.0, 0.0, 0.0],
        [1.0 / 2.0, 0.0, 0.0, 0.0],
        [0.0, 3.0 / 4.0, 0.0, 0.0],
        [2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0, 0.0],
    ];
    const B: [f64; 4] = [2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0, 0.0];
    const BHAT: [f64; 4] = [7.0 / 24.0, 1.0 / 4.0, 1.0 / 3.0, 1.0 / 8.0];
    const C: [f64; 4] = [0.0, 1.0 / 2.0, 3.0 / 4.0, 1.0];
    const ORDER: usize = 3;
    const FSAL: bool = true;
}
