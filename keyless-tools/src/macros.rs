// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

macro_rules! debug {
    (@$color:ident, $($msg:expr),*) => {{
        use crate::utils::color::Color;
        let msg = format!($($msg),*);
        log::debug!("{}", msg.$color())
    }};
}

macro_rules! warn {
    (@$color:ident, $($msg:expr),*) => {{
        use crate::utils::color::Color;
        let msg = format!($($msg),*);
        log::warn!("{}", msg.$color())
    }};
}

/// Prints a report line, but only when `$verbose` is set.
macro_rules! greyln {
    ($verbose:expr, $($msg:expr),*) => {{
        if $verbose {
            use crate::utils::color::Color;
            let msg = format!($($msg),*);
            println!("{}", msg.grey())
        }
    }};
}

macro_rules! mintln {
    ($verbose:expr, $($msg:expr),*) => {{
        if $verbose {
            use crate::utils::color::Color;
            let msg = format!($($msg),*);
            println!("{}", msg.mint())
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn report_lines_are_skipped_when_quiet() {
        let formatted = std::cell::Cell::new(0);
        let arg = || {
            formatted.set(formatted.get() + 1);
            "0x84ab290153e251ebfabccb237f6cac8570b87558"
        };
        mintln!(false, "contract deployed at address: {}", arg());
        greyln!(false, "deploying from keyless account {}", arg());
        assert_eq!(formatted.get(), 0);

        mintln!(true, "contract deployed at address: {}", arg());
        assert_eq!(formatted.get(), 1);
    }
}
