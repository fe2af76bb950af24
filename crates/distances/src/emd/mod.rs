//! The Earth-Mover's distance between windowed brightness signatures.
//!
//! Each image is binned into rectangular windows (see [`WindowShape`]), and
//! the brightness of each window becomes a mass located at the window's
//! centroid (see [`Signature`]). Both signatures are normalized to the same
//! total mass, and the distance is the cheapest way to move one set of masses
//! onto the other when moving a unit of mass costs the distance between the
//! two centroids. That minimum is found by solving the transportation problem
//! (see [`LinearProgram::transportation`]) with the simplex method (see
//! [`linprog`]).

mod signature;
mod simplex;
mod transport;
mod window;

pub use signature::{normalize_pair, Signature, BRIGHTNESS_OFFSET, GOAL_MASS};
pub use simplex::{linprog, LinProgOptions, LinProgResult, SolverStatus};
pub use transport::{flow_index, LinearProgram, Row};
pub use window::WindowShape;

use crate::Number;

/// Errors from computing the Earth-Mover's distance.
#[derive(Debug, Clone, PartialEq)]
pub enum EmdError {
    /// The window shape or another parameter is invalid.
    Configuration(String),
    /// An image or signature does not have the expected number of elements.
    Shape {
        /// The expected number of elements.
        expected: usize,
        /// The actual number of elements.
        actual: usize,
    },
    /// The transportation problem could not be solved.
    Solver(SolverStatus),
}

impl core::fmt::Display for EmdError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Shape { expected, actual } => {
                write!(f, "shape mismatch: expected {expected} elements, got {actual}")
            }
            Self::Solver(status) => write!(f, "solver failure: {status}"),
        }
    }
}

impl std::error::Error for EmdError {}

impl From<SolverStatus> for EmdError {
    fn from(status: SolverStatus) -> Self {
        Self::Solver(status)
    }
}

/// The Earth-Mover's distance for a fixed window shape.
///
/// The centroid-to-centroid cost vector only depends on the window shape, so
/// it is computed once and shared by every call to [`Emd::distance`].
#[derive(Debug, Clone)]
pub struct Emd {
    /// The shape of the windows.
    shape: WindowShape,
    /// The cost of moving a unit of mass between each pair of windows.
    cost: Vec<f64>,
    /// The total mass of each normalized signature.
    goal_mass: f64,
    /// Options for the simplex solver.
    options: LinProgOptions,
}

impl Emd {
    /// Creates a new `Emd` for the given window shape.
    #[must_use]
    pub fn new(shape: WindowShape) -> Self {
        Self {
            shape,
            cost: shape.cost_vector(),
            goal_mass: GOAL_MASS,
            options: LinProgOptions::default(),
        }
    }

    /// Sets the total mass that both signatures are normalized to.
    #[must_use]
    pub fn with_goal_mass(mut self, goal_mass: f64) -> Self {
        self.goal_mass = goal_mass;
        self
    }

    /// Sets the options for the simplex solver.
    #[must_use]
    pub fn with_options(mut self, options: LinProgOptions) -> Self {
        self.options = options;
        self
    }

    /// The shape of the windows.
    #[must_use]
    pub const fn shape(&self) -> &WindowShape {
        &self.shape
    }

    /// The total mass of each normalized signature.
    #[must_use]
    pub const fn goal_mass(&self) -> f64 {
        self.goal_mass
    }

    /// Builds the transportation problem between two images.
    ///
    /// # Errors
    ///
    /// * If either image does not have `side * side` pixels.
    pub fn program<T: Number>(&self, x: &[T], y: &[T]) -> Result<LinearProgram, EmdError> {
        let sx = Signature::extract(&self.shape, x)?;
        let sy = Signature::extract(&self.shape, y)?;
        let (sx, sy) = normalize_pair(&sx, &sy, self.goal_mass)?;
        LinearProgram::transportation(&self.cost, &sx, &sy)
    }

    /// The Earth-Mover's distance between two images.
    ///
    /// # Errors
    ///
    /// * If either image does not have `side * side` pixels.
    /// * If the simplex solver fails, which indicates a malformed program.
    pub fn distance<T: Number>(&self, x: &[T], y: &[T]) -> Result<f64, EmdError> {
        let program = self.program(x, y)?;
        let result = linprog(&program, &self.options)?;
        Ok(result.fun)
    }
}

/// The Earth-Mover's distance between two images with the given window shape.
///
/// This builds the cost vector for every call. Use [`Emd`] to compute many
/// distances with the same window shape.
///
/// # Errors
///
/// See [`Emd::distance`].
///
/// # Examples
///
/// ```
/// use emd_distances::emd::{earth_movers, WindowShape};
///
/// let shape = WindowShape::new(1, 1, 2).unwrap();
/// let x: Vec<u8> = vec![255, 0, 0, 0];
/// let y: Vec<u8> = vec![0, 255, 0, 0];
///
/// // 255 of the 259 units of mass move one pixel to the right.
/// let distance = earth_movers(&shape, &x, &y).unwrap();
/// assert!((distance - 255.0 / 259.0).abs() < 1e-9);
/// ```
pub fn earth_movers<T: Number>(shape: &WindowShape, x: &[T], y: &[T]) -> Result<f64, EmdError> {
    Emd::new(*shape).distance(x, y)
}
