//! Hands out license codes after a purchase.

use std::sync::Arc;

use crate::license_store::{LicenseCode, LicenseCodeSet};

/// Chooses which entry of the code set to hand out.
///
/// `len` is always at least 1 and the returned index must be below it.
pub trait DrawStrategy: Send + Sync {
    fn draw(&self, len: usize) -> usize;
}

/// Uniform draw with replacement. Codes are never reserved or consumed, so
/// two purchases can receive the same code.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformDraw;

impl DrawStrategy for UniformDraw {
    fn draw(&self, len: usize) -> usize {
        rand::random_range(0..len)
    }
}

#[derive(Clone)]
pub struct CodeIssuer {
    codes: LicenseCodeSet,
    strategy: Arc<dyn DrawStrategy>,
}

impl CodeIssuer {
    pub fn new(codes: LicenseCodeSet) -> Self {
        Self::with_strategy(codes, Arc::new(UniformDraw))
    }

    pub fn with_strategy(codes: LicenseCodeSet, strategy: Arc<dyn DrawStrategy>) -> Self {
        Self { codes, strategy }
    }

    pub fn issue(&self) -> LicenseCode {
        let index = self.strategy.draw(self.codes.len());
        self.codes.all()[index].clone()
    }
}
