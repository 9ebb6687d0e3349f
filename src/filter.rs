use crate::error::{Error, Result};
use log::debug;
use regex::Regex;

/// Receiver of a method declaration, e.g. `(c *UserController)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Receiver type name without the pointer star
    pub type_name: String,
    /// Whether the receiver is declared as a pointer
    pub is_pointer: bool,
}

/// A function discovered in the source that may document an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRoute {
    /// Function or method name
    pub name: String,
    /// The method receiver, `None` for free functions
    pub receiver: Option<Receiver>,
}

impl CandidateRoute {
    /// A free function without receiver.
    pub fn function(name: &str) -> Self {
        Self {
            name: name.to_string(),
            receiver: None,
        }
    }

    /// A method on `type_name`.
    pub fn method(name: &str, type_name: &str, is_pointer: bool) -> Self {
        Self {
            name: name.to_string(),
            receiver: Some(Receiver {
                type_name: type_name.to_string(),
                is_pointer,
            }),
        }
    }
}

/// Decides which candidate routes belong to the documented API surface.
///
/// Without a controller pattern every candidate is included. With one, only
/// methods on a pointer receiver whose type name contains a match of the
/// pattern are included.
#[derive(Debug, Clone, Default)]
pub struct RouteInclusionFilter {
    controller_pattern: Option<Regex>,
}

impl RouteInclusionFilter {
    /// Builds the filter, compiling the controller pattern once.
    ///
    /// An empty pattern is treated as "no pattern".
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the pattern is not a valid regular
    /// expression.
    pub fn new(controller_pattern: Option<&str>) -> Result<Self> {
        let controller_pattern = match controller_pattern {
            Some(pattern) if !pattern.is_empty() => {
                let regex = Regex::new(pattern).map_err(|e| {
                    Error::Configuration(format!(
                        "the controllerClass argument is not a valid regular expression: {}",
                        e
                    ))
                })?;
                debug!("Filtering controllers with pattern {}", pattern);
                Some(regex)
            }
            _ => None,
        };
        Ok(Self { controller_pattern })
    }

    /// Whether `candidate` should be documented.
    pub fn is_included(&self, candidate: &CandidateRoute) -> bool {
        let Some(pattern) = &self.controller_pattern else {
            return true;
        };
        match &candidate.receiver {
            Some(receiver) if receiver.is_pointer => pattern.is_match(&receiver.type_name),
            _ => false,
        }
    }
}
