//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Discretization](#discretization)
//! - [Eigensolver](#eigensolver)
//! - [Growth rates](#growth-rates)
//! - [Normalization](#normalization)
//!
//! # Background
//! Symmetric instability is an overturning instability of a rotating,
//! stably stratified flow that occurs where the potential vorticity has the
//! opposite sign to the Coriolis parameter *f*[^1]. For a barotropic
//! along-channel jet *V*(*x*) over uniform stratification *N*², this reduces to
//! the condition *f* *ζ* < 0, where
//! ```text
//!            ∂V
//! ζ(x) = f + --
//!            ∂x
//! ```
//! is the absolute vorticity. Perturbations with no along-channel variation and
//! a streamfunction
//! ```text
//! ψ(x, z, t) = ψ̂(x) exp(i (m z - ω̂ t))
//! ```
//! then satisfy a second-order boundary value problem across the channel[^2],
//! ```text
//!    N²  ∂²ψ̂                      1  ∂²ψ̂
//! - ---- --- + f ζ(x) ψ̂ = ω̂² (ψ̂ - -- ---)
//!    m²  ∂x²                      m² ∂x²
//! ```
//! with eigenvalue *ω̂*². The second term on the right is the vertical
//! acceleration; the hydrostatic approximation drops it, leaving
//! ```text
//!    N²  ∂²ψ̂
//! - ---- --- + f ζ(x) ψ̂ = ω̂² ψ̂
//!    m²  ∂x²
//! ```
//! Both operators are self-adjoint and the right-hand one is positive-definite,
//! so *ω̂*² is real. Negative eigenvalues are unstable modes, and the most
//! negative one (the least stable) is bounded below by min(*f* *ζ*).
//!
//! The jet used here is
//! ```text
//!                 x - x_mid
//! V(x) = V0 sech²(---------)
//!                     δ
//! ```
//! whose vorticity minimum sits at *x*<sub>mid</sub> + *δ* atanh(1/√3).
//!
//! # Discretization
//! On the uniform grid
//! ```text
//! x[i] = i δx, i ∊ {0, ..., N - 1}
//! ```
//! the second derivative is replaced by the three-point stencil
//! ```text
//! D2 = (I{-1} - 2 I{0} + I{+1}) / δx²
//! ```
//! where *I*{*k*} is the *N*×*N* matrix with elements equal to 1 on the *k*-th
//! diagonal and 0 elsewhere. No explicit boundary condition is imposed: the
//! first and last rows simply lack their outer neighbor, which amounts to
//! *ψ̂* = 0 one step outside the grid. The problem becomes the symmetric-definite
//! pencil
//! ```text
//! A ψ = ω̂² M ψ
//!
//! A = -(N²/m²) D2 + diag(f ζ)
//! M = I - D2/m²   (non-hydrostatic)
//! M = I           (hydrostatic)
//! ```
//! in which both *A* and *M* are tridiagonal, and *M* ≥ *I*.
//!
//! # Eigensolver
//! Only the smallest eigenvalue is needed. For a symmetric tridiagonal pencil,
//! Sylvester's law of inertia gives the number of eigenvalues below any shift
//! *σ* as the number of negative pivots in the LDLᵀ factorization of
//! *A* - *σ* *M*, computed by an *O*(*N*) recurrence[^3]. Bisection on this count
//! isolates the smallest eigenvalue to full precision, after which a few steps
//! of inverse iteration
//! ```text
//! (A - σ M) y = M x[k],  x[k + 1] = y / ‖y‖
//! ```
//! with the shift at the eigenvalue converge to the eigenvector. The whole
//! solve costs *O*(*N*) memory and *O*(*N* log(1/*ε*)) time, in contrast with
//! the *O*(*N*³) dense decomposition, which is kept for cross-checks on small
//! grids.
//!
//! The reference location for normalization is found by minimizing *ζ*(*x*)
//! with Brent's bounded method[^4].
//!
//! # Growth rates
//! Vertical viscosity *A*<sub>r</sub> damps a mode at a rate
//! *A*<sub>r</sub> *m*², so that
//! ```text
//! ω = ω̂ - i A_r m²
//! σ = Im(ω)
//! ```
//! where *ω̂* is the principal square root of the eigenvalue. The branch cut is
//! taken on the negative real axis approached from above, so a negative real
//! eigenvalue always maps to a positive imaginary frequency. Points with
//! *σ* < 0 are masked: they are either stable or belong to the decaying
//! branch. Since viscous damping grows like *m*², it removes short waves first
//! and the most unstable wavelength moves toward longer waves as
//! *A*<sub>r</sub> increases. The e-folding time of the fastest mode is
//! 1/*σ*\* (reported in days).
//!
//! # Normalization
//! Eigenvectors carry an arbitrary scale and sign. Each is first multiplied by
//! the sign of its value at the vorticity minimum, then divided either by its
//! sum over the grid or by its value at the vorticity minimum. A zero reference
//! value or zero sum yields NaN rather than an error.
//!
//! [^1]: B. J. Hoskins, "The role of potential vorticity in symmetric stability
//! and instability." Q. J. R. Meteorol. Soc. **100**, 480-482 (1974).
//!
//! [^2]: P. H. Stone, "On non-geostrophic baroclinic stability." J. Atmos. Sci.
//! **23**, 390-400 (1966).
//!
//! [^3]: W. Barth, R. S. Martin, and J. H. Wilkinson, "Calculation of the
//! eigenvalues of a symmetric tridiagonal matrix by the method of bisection."
//! Numer. Math. **9**, 386-393 (1967).
//!
//! [^4]: R. P. Brent, *Algorithms for Minimization without Derivatives*
//! (Prentice-Hall, 1973).
