use crate::error::Error;

pub struct Formatter {}

impl Formatter {
    pub const FILL_CHAR: char = '=';
    pub const BLANK_CHAR: char = ' ';

    const UNITS: [&'static str; 5] = ["B", "K", "M", "G", "T"];

    pub fn format_size(size: u64, human_readable: bool) -> String {
        if human_readable {
            Self::human_readable(size as f64)
        } else {
            format!("{} B", size)
        }
    }

    /// Scales `size` by 1024 until it drops below 1024, falling back to `P`.
    ///
    /// There is no carry after rounding, so 1048575 bytes print as
    /// `1024.0 K` instead of `1.0 M`.
    pub fn human_readable(size: f64) -> String {
        let mut size_float = size;
        for unit in Self::UNITS {
            if size_float < 1024.0 {
                return format!("{:.1} {}", size_float, unit);
            }
            size_float /= 1024.0;
        }

        format!("{:.1} P", size_float)
    }

    /// Renders `percent` as a bar of exactly `width` characters.
    ///
    /// The number of fill characters is `round(percent / 100 * width)`,
    /// rounding half away from zero.
    pub fn percent_to_graph(percent: f64, width: usize) -> Result<String, Error> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(Error::InvalidPercent(percent));
        }

        let filled = ((percent / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);

        let mut graph = String::with_capacity(width);
        graph.extend(std::iter::repeat(Self::FILL_CHAR).take(filled));
        graph.extend(std::iter::repeat(Self::BLANK_CHAR).take(width - filled));
        Ok(graph)
    }
}
