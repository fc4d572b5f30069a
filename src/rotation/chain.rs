//! Chains of elemental rotations composed in the world frame.
//!
//! A chain is an ordered list of [`RotationStep`]s. Each step is interpreted in the
//! fixed world frame, so composition pre-multiplies:
//!
//! ```text
//! q = qₙ ⊗ … ⊗ q₂ ⊗ q₁
//! ```
//!
//! Reversing the product order would turn this into body-frame composition, which
//! is a different rotation for any chain whose steps do not commute.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::rotation::{Axis, Quaternion, RotationError, ensure_finite};

/// Opaque identity of a step within its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One elemental rotation about a basis axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationStep {
    pub id: StepId,
    pub axis: Axis,
    pub angle_deg: f64,
}

impl fmt::Display for RotationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.4}°)", self.axis, self.angle_deg)
    }
}

impl RotationStep {
    pub const fn new(id: StepId, axis: Axis, angle_deg: f64) -> Self {
        Self {
            id,
            axis,
            angle_deg,
        }
    }

    pub fn try_new(id: StepId, axis: Axis, angle_deg: f64) -> Result<Self, RotationError> {
        Ok(Self::new(id, axis, ensure_finite("step.angle", angle_deg)?))
    }

    /// Elemental quaternion of this step.
    pub fn quaternion(&self) -> Quaternion {
        self.axis.quaternion(self.angle_deg)
    }
}

/// Fold a sequence of steps into one unit quaternion.
///
/// Each step pre-multiplies the accumulated rotation. An empty chain is the identity.
pub fn compute_chain(steps: &[RotationStep]) -> Quaternion {
    steps
        .iter()
        .fold(Quaternion::identity(), |accum, step| {
            let next = step.quaternion().multiply(&accum);
            trace!(step = %step.id, axis = %step.axis, angle = step.angle_deg, "chain fold");
            next
        })
        .normalize()
}

/// Editable chain of rotation steps.
///
/// Owns the step order and allocates ids for the steps it creates. Ids are unique
/// within one chain. Removed ids are not reused until the ids above the largest
/// one ever present run out.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationChain {
    steps: Vec<RotationStep>,
    /// Next id above every id seen so far, `None` once `u64::MAX` is taken
    next_id: Option<u64>,
}

impl Default for RotationChain {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            next_id: Some(0),
        }
    }
}

impl RotationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing steps. New ids continue after the largest id present.
    pub fn from_steps(steps: Vec<RotationStep>) -> Self {
        let next_id = match steps.iter().map(|s| s.id.0).max() {
            Some(largest) => largest.checked_add(1),
            None => Some(0),
        };
        Self { steps, next_id }
    }

    pub fn steps(&self) -> &[RotationStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<RotationStep> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Position of the step with `id`.
    pub fn position(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    pub fn get(&self, id: StepId) -> Option<&RotationStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    fn allocate_id(&mut self) -> StepId {
        if let Some(next) = self.next_id {
            self.next_id = next.checked_add(1);
            return StepId(next);
        }

        // Ids above the largest are used up; take the lowest free one
        let mut used: Vec<u64> = self.steps.iter().map(|s| s.id.0).collect();
        used.sort_unstable();
        used.dedup();
        let free = used
            .iter()
            .enumerate()
            .find(|(index, id)| **id != *index as u64)
            .map_or(used.len() as u64, |(index, _)| index as u64);
        trace!(id = free, "step id space exhausted, reusing lowest free id");
        StepId(free)
    }

    fn step_mut(&mut self, id: StepId) -> Result<&mut RotationStep, RotationError> {
        self.steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RotationError::UnknownStep(id))
    }

    /// Append a step and return its id.
    pub fn push(&mut self, axis: Axis, angle_deg: f64) -> Result<StepId, RotationError> {
        let angle_deg = ensure_finite("step.angle", angle_deg)?;
        let id = self.allocate_id();
        self.steps.push(RotationStep::new(id, axis, angle_deg));
        Ok(id)
    }

    /// Insert a step at `index` (0..=len) and return its id.
    pub fn insert(
        &mut self,
        index: usize,
        axis: Axis,
        angle_deg: f64,
    ) -> Result<StepId, RotationError> {
        if index > self.steps.len() {
            return Err(RotationError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        let angle_deg = ensure_finite("step.angle", angle_deg)?;
        let id = self.allocate_id();
        self.steps.insert(index, RotationStep::new(id, axis, angle_deg));
        Ok(id)
    }

    pub fn remove(&mut self, id: StepId) -> Result<RotationStep, RotationError> {
        let index = self.position(id).ok_or(RotationError::UnknownStep(id))?;
        Ok(self.steps.remove(index))
    }

    pub fn set_angle(&mut self, id: StepId, angle_deg: f64) -> Result<(), RotationError> {
        let angle_deg = ensure_finite("step.angle", angle_deg)?;
        self.step_mut(id)?.angle_deg = angle_deg;
        Ok(())
    }

    pub fn set_axis(&mut self, id: StepId, axis: Axis) -> Result<(), RotationError> {
        self.step_mut(id)?.axis = axis;
        Ok(())
    }

    /// Move the step with `id` so it ends up at `index` (0..len).
    pub fn move_step(&mut self, id: StepId, index: usize) -> Result<(), RotationError> {
        let from = self.position(id).ok_or(RotationError::UnknownStep(id))?;
        if index >= self.steps.len() {
            return Err(RotationError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        let step = self.steps.remove(from);
        self.steps.insert(index, step);
        Ok(())
    }

    /// Composed rotation of the whole chain.
    pub fn to_quaternion(&self) -> Quaternion {
        compute_chain(&self.steps)
    }
}

impl fmt::Display for RotationChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RotationChain[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{step}")?;
        }
        write!(f, "]")
    }
}
