use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use itertools::Itertools;
use tokens::{Col, Line};

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[{line}:{col}] {message}")]
pub struct SyntaxError {
    pub line: Line,
    pub col: Col,
    pub message: String,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub struct SyntaxErrors(pub Vec<SyntaxError>);

impl From<SyntaxError> for SyntaxErrors {
    fn from(e: SyntaxError) -> Self {
        Self(vec![e])
    }
}

impl Deref for SyntaxErrors {
    type Target = Vec<SyntaxError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SyntaxErrors {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for SyntaxErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|e| e.to_string()).join("\n"))
    }
}

pub type Result<T> = std::result::Result<T, SyntaxError>;
