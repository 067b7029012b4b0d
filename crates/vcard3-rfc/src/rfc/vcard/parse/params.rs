//! Parameter consumption for a single content line.

use crate::rfc::vcard::core::{ExtensionParam, VCardParameter};

/// The parameters of one content line, drained as the property grammar
/// claims them.
///
/// Whatever is left when the property is built becomes its extension
/// parameter list, in the order the parameters were written.
#[derive(Debug, Default)]
pub(crate) struct ParamSet {
    params: Vec<VCardParameter>,
}

impl ParamSet {
    pub(crate) fn new(params: Vec<VCardParameter>) -> Self {
        Self { params }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Takes every value of every parameter named `name`, flattened.
    ///
    /// `TYPE=a,b` and `TYPE=a;TYPE=b` both yield `["a", "b"]`.
    pub(crate) fn take_multiple_values(&mut self, name: &str) -> Vec<String> {
        let mut values = Vec::new();
        self.params.retain_mut(|param| {
            if param.name == name {
                values.append(&mut param.values);
                false
            } else {
                true
            }
        });
        values
    }

    /// Takes the first parameter named `name`, comma-joined.
    pub(crate) fn take_single_value(&mut self, name: &str) -> Option<String> {
        let index = self.params.iter().position(|p| p.name == name)?;
        Some(self.params.remove(index).joined())
    }

    /// Takes the first parameter named `name` if its only value equals
    /// `value` (case-insensitive).
    pub(crate) fn take_flag(&mut self, name: &str, value: &str) -> bool {
        let found = self.params.iter().position(|p| {
            p.name == name && p.values.len() == 1 && p.values[0].eq_ignore_ascii_case(value)
        });
        match found {
            Some(index) => {
                self.params.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn into_x_params(self) -> Vec<ExtensionParam> {
        self.params.into_iter().map(ExtensionParam::from).collect()
    }
}
