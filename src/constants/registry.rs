use std::collections::HashMap;

use log::debug;

use crate::core::value::Scalar;

use super::Constants;

/// Constant tables addressed by class name.
#[derive(Debug, Clone, Default)]
pub struct ConstantRegistry {
    classes: HashMap<String, Vec<(&'static str, Scalar)>>,
}

impl ConstantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the table of `T` under `class`, replacing any previous one.
    pub fn register<T: Constants>(&mut self, class: &str) -> &mut Self {
        self.register_table(class, T::constants())
    }

    pub fn register_table(
        &mut self,
        class: &str,
        constants: Vec<(&'static str, Scalar)>,
    ) -> &mut Self {
        debug!("Registering {} constants for {}", constants.len(), class);
        self.classes.insert(class.to_string(), constants);
        self
    }

    pub fn contains_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// The table registered under `class`, if any.
    pub fn constants(&self, class: &str) -> Option<&[(&'static str, Scalar)]> {
        self.classes.get(class).map(Vec::as_slice)
    }
}
