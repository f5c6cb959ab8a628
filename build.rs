use std::env;

// Environment variable selecting the default vector width of the emulated unit
const WIDTH_VAR: &str = "MASKLY_VECTOR_WIDTH";

// Width used when nothing is configured
const DEFAULT_WIDTH: usize = 4;

// Widest unit the crate is willing to emulate
const MAX_WIDTH: usize = 64;

#[derive(Debug)]
struct WidthConfig {
    width: usize,
    source: &'static str,
}

impl WidthConfig {
    fn from_env() -> Self {
        match env::var(WIDTH_VAR) {
            Ok(raw) => {
                let width = raw.trim().parse::<usize>().unwrap_or_else(|_| {
                    panic!("{WIDTH_VAR} must be an unsigned integer, got {raw:?}")
                });
                Self {
                    width,
                    source: "environment",
                }
            }
            Err(_) => Self {
                width: DEFAULT_WIDTH,
                source: "default",
            },
        }
    }

    fn validate(&self) {
        if !self.width.is_power_of_two() || self.width > MAX_WIDTH {
            panic!(
                "{WIDTH_VAR}={} is invalid: vector width must be a power of two in 1..={MAX_WIDTH}",
                self.width
            );
        }
    }

    fn apply(&self) {
        println!("applying: vector width {} ({})", self.width, self.source);

        println!("cargo:rustc-env={WIDTH_VAR}={}", self.width);
    }
}

fn main() {
    // Rebuild whenever the configured width changes
    println!("cargo:rerun-if-env-changed={WIDTH_VAR}");
    println!("cargo:rerun-if-changed=build.rs");

    let config = WidthConfig::from_env();

    config.validate();

    config.apply();
}
