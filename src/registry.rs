//! The fixed mapping from animation id to configured behavior.

use crate::animation::{Activation, Behavior, Off};
use crate::types::AnimationId;

/// Errors that can occur while building a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No behavior was registered for this id.
    Missing(AnimationId),

    /// A behavior was already registered for this id.
    Duplicate(AnimationId),
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistryError::Missing(id) => {
                write!(f, "no behavior registered for animation {}", id)
            }
            RegistryError::Duplicate(id) => {
                write!(f, "animation {} is already registered", id)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}

/// Read-only lookup table with exactly one behavior per [`AnimationId`].
///
/// A registry can only be obtained complete, either through
/// [`AnimationRegistry::builtin`] or a [`RegistryBuilder`] whose `build`
/// checks that every id has a behavior. Lookups are therefore total.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRegistry {
    entries: [Behavior; AnimationId::COUNT],
}

impl AnimationRegistry {
    /// A registry with the default configuration of every built-in.
    pub fn builtin() -> Self {
        Self {
            entries: AnimationId::ALL.map(Behavior::builtin),
        }
    }

    /// Starts building a registry from scratch.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The behavior registered for `id`.
    #[inline]
    pub fn get(&self, id: AnimationId) -> &Behavior {
        &self.entries[id.index()]
    }

    /// A fresh activation of the animation registered for `id`.
    #[inline]
    pub fn activate(&self, id: AnimationId) -> Activation {
        self.get(id).activate()
    }

    /// All behaviors, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Behavior> + '_ {
        self.entries.iter()
    }
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for [`AnimationRegistry`] with completeness checking.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    entries: [Option<Behavior>; AnimationId::COUNT],
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            entries: [None; AnimationId::COUNT],
        }
    }

    /// Registers a behavior under its own id.
    ///
    /// # Errors
    /// * `Duplicate` - this id already has a behavior
    pub fn register(mut self, behavior: Behavior) -> Result<Self, RegistryError> {
        let id = behavior.id();
        let slot = &mut self.entries[id.index()];
        if slot.is_some() {
            return Err(RegistryError::Duplicate(id));
        }

        *slot = Some(behavior);
        Ok(self)
    }

    /// Registers the default configuration of every id not yet registered.
    pub fn with_builtin_defaults(mut self) -> Self {
        for id in AnimationId::ALL {
            let slot = &mut self.entries[id.index()];
            if slot.is_none() {
                *slot = Some(Behavior::builtin(id));
            }
        }
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    /// * `Missing` - the first id without a behavior
    pub fn build(self) -> Result<AnimationRegistry, RegistryError> {
        // Every slot is overwritten below or the build fails
        let mut entries = [Behavior::Off(Off); AnimationId::COUNT];

        for ((slot, id), entry) in entries
            .iter_mut()
            .zip(AnimationId::ALL)
            .zip(self.entries)
        {
            *slot = entry.ok_or(RegistryError::Missing(id))?;
        }

        Ok(AnimationRegistry { entries })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_with_only_defaults_matches_builtin() {
        let built = RegistryBuilder::new()
            .with_builtin_defaults()
            .build()
            .unwrap();
        assert_eq!(built, AnimationRegistry::builtin());
    }

    #[test]
    fn build_keeps_every_registered_behavior() {
        let mut builder = RegistryBuilder::new();
        for id in AnimationId::ALL.into_iter().rev() {
            builder = builder.register(Behavior::builtin(id)).unwrap();
        }
        let registry = builder.build().unwrap();
        for id in AnimationId::ALL {
            assert_eq!(registry.get(id).id(), id);
        }
    }

    #[test]
    fn gap_after_the_first_id_is_not_filled_in() {
        let result = RegistryBuilder::new()
            .register(Behavior::builtin(AnimationId::Off))
            .unwrap()
            .build();
        assert_eq!(result, Err(RegistryError::Missing(AnimationId::Blink)));
    }

    #[test]
    fn duplicate_registration_leaves_no_registry() {
        let result = RegistryBuilder::new()
            .with_builtin_defaults()
            .register(Behavior::builtin(AnimationId::Off));
        assert_eq!(
            result.err(),
            Some(RegistryError::Duplicate(AnimationId::Off))
        );
    }
}
