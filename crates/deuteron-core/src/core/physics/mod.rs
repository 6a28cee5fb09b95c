//! Pure numerical building blocks: the momentum-space wave function, the asymptotic sum
//! rules of its parameterization, and trapezoidal quadrature on tabulated data.

pub mod quadrature;
pub mod sum_rules;
pub mod wavefunction;
