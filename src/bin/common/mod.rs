use std::fmt::Display;
use std::process;

use ansi_term::Colour;
use env_logger::WriteStyle;

/// When to color the diagnostics written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ColorChoice {
    Always,
    Auto,
    Never,
}

impl ColorChoice {
    pub(super) fn use_color_for(self, stream: atty::Stream) -> bool {
        match self {
            ColorChoice::Auto => atty::is(stream),
            choice => choice == ColorChoice::Always,
        }
    }

    /// The same choice, for the log output on stderr.
    pub(super) fn write_style(self) -> WriteStyle {
        match self {
            ColorChoice::Always => WriteStyle::Always,
            ColorChoice::Auto => WriteStyle::Auto,
            ColorChoice::Never => WriteStyle::Never,
        }
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = String;
    fn from_str(when: &str) -> Result<ColorChoice, String> {
        Ok(match when {
            "always" => ColorChoice::Always,
            "auto" => ColorChoice::Auto,
            "never" => ColorChoice::Never,
            _ => {
                return Err(format!(
                    "invalid color choice `{}`: expected always, auto or never",
                    when
                ))
            }
        })
    }
}

#[cfg(feature = "color-backtrace")]
pub(super) mod backtrace {
    use super::ColorChoice;
    use color_backtrace::termcolor::{self, StandardStream};
    use color_backtrace::BacktracePrinter;

    impl From<ColorChoice> for termcolor::ColorChoice {
        fn from(color: ColorChoice) -> Self {
            match color {
                ColorChoice::Always => termcolor::ColorChoice::Always,
                ColorChoice::Auto => termcolor::ColorChoice::Auto,
                ColorChoice::Never => termcolor::ColorChoice::Never,
            }
        }
    }

    pub(crate) fn install(color: ColorChoice) {
        BacktracePrinter::new().install(Box::new(StandardStream::stderr(color.into())));
    }

    #[cfg(test)]
    mod tests {
        use super::{termcolor, ColorChoice};

        #[test]
        fn forwards_color_choice() {
            let always: termcolor::ColorChoice = ColorChoice::Always.into();
            let never: termcolor::ColorChoice = ColorChoice::Never.into();
            let auto: termcolor::ColorChoice = ColorChoice::Auto.into();
            assert_eq!(always, termcolor::ColorChoice::Always);
            assert_eq!(never, termcolor::ColorChoice::Never);
            assert_eq!(auto, termcolor::ColorChoice::Auto);
        }
    }
}

pub(super) fn fatal<T: Display>(msg: T, code: i32, color: ColorChoice) -> ! {
    if color.use_color_for(atty::Stream::Stderr) {
        eprintln!("{}: {}", Colour::Red.bold().paint("fatal"), msg);
    } else {
        eprintln!("fatal: {}", msg);
    }
    process::exit(code);
}

macro_rules! type_sizes {
    ($($type: ty),*) => {
        $(println!("{}: {}", stringify!($type), std::mem::size_of::<$type>());)*
    };
}

#[cfg(test)]
mod tests {
    use super::ColorChoice;
    use env_logger::WriteStyle;

    #[test]
    fn parse_color() {
        assert_eq!("always".parse(), Ok(ColorChoice::Always));
        assert_eq!("never".parse(), Ok(ColorChoice::Never));
        assert_eq!("auto".parse(), Ok(ColorChoice::Auto));
        let err = "sometimes".parse::<ColorChoice>().unwrap_err();
        assert!(err.contains("`sometimes`"), "{}", err);
        assert!(ColorChoice::Always.use_color_for(atty::Stream::Stderr));
        assert!(!ColorChoice::Never.use_color_for(atty::Stream::Stdout));
    }

    #[test]
    fn log_style_follows_choice() {
        assert_eq!(ColorChoice::Always.write_style(), WriteStyle::Always);
        assert_eq!(ColorChoice::Never.write_style(), WriteStyle::Never);
        assert_eq!(ColorChoice::Auto.write_style(), WriteStyle::Auto);
    }
}
