//! Group code generation.

use rand::Rng;

/// Characters a group code is drawn from.
const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a group code.
pub const CODE_LENGTH: usize = 6;

/// Source of new group codes.
///
/// The registry asks for a fresh candidate on every attempt, so an
/// implementation may return the same code twice.
pub trait CodeGenerator: Send + Sync {
    /// Produce a candidate group code.
    fn generate(&self) -> String;
}

/// Random 6-character uppercase alphanumeric codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..CODE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CODE_CHARS.len());
                CODE_CHARS[idx] as char
            })
            .collect()
    }
}

impl<F> CodeGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Whether `code` has the shape of a group code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_code_shape() {
        let generator = RandomCodeGenerator;
        for _ in 0..100 {
            let code = generator.generate();
            assert!(is_valid_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn test_closure_generator() {
        let generator = || "ABC123".to_string();
        assert_eq!(generator.generate(), "ABC123");
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("ABC123"));
        assert!(!is_valid_code("abc123"));
        assert!(!is_valid_code("ABC12"));
        assert!(!is_valid_code("ABC1234"));
        assert!(!is_valid_code("ABC-12"));
    }
}
