// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Admittance policies of the Darwin engine.

use crate::{InferenceKind, UnsupportedInferenceError};

/// Darwin-engine admittance: the spline/linear combinations of the seven
/// majors, or nothing at all. The frequency-domain policies (linear,
/// Fourier) belong to the Doodson engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Inference {
    Spline,
    Zero,
}

impl Inference {
    pub(crate) fn from_kind(
        kind: InferenceKind,
    ) -> Result<Self, UnsupportedInferenceError> {
        match kind {
            InferenceKind::Spline => Ok(Inference::Spline),
            InferenceKind::Zero => Ok(Inference::Zero),
            InferenceKind::Linear | InferenceKind::Fourier => {
                Err(UnsupportedInferenceError {
                    kind,
                    engine: "darwin",
                })
            }
        }
    }
}
