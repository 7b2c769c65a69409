use console::Style;
use zeroize::Zeroizing;

use neonpass::generator::GenerationConfig;
use neonpass::strength::StrengthResult;

pub const STRONG_SCORE: u8 = 70;
pub const FAIR_SCORE: u8 = 40;

const BAR_WIDTH: usize = 20;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

pub fn strength_label(score: u8) -> &'static str {
    if score >= STRONG_SCORE {
        "Strong"
    } else if score >= FAIR_SCORE {
        "Fair"
    } else {
        "Weak"
    }
}

fn strength_style(score: u8, color_support: bool) -> Style {
    if !color_support {
        return Style::new();
    }
    if score >= STRONG_SCORE {
        Style::new().green()
    } else if score >= FAIR_SCORE {
        Style::new().yellow()
    } else {
        Style::new().red()
    }
}

fn render_bar(score: u8, unicode_support: bool) -> String {
    let filled = (score as usize * BAR_WIDTH).div_ceil(100).min(BAR_WIDTH);
    let (fill, rest) = if unicode_support {
        ("█", "░")
    } else {
        ("#", "-")
    };
    let mut bar = String::with_capacity(BAR_WIDTH * fill.len());
    for _ in 0..filled {
        bar.push_str(fill);
    }
    for _ in filled..BAR_WIDTH {
        bar.push_str(rest);
    }
    bar
}

pub fn display_output(
    password: &Zeroizing<String>,
    result: &StrengthResult,
    config: &GenerationConfig,
    source_secure: bool,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &**password);
        return;
    }

    println!("{}\n", &**password);

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);

    let source_style = if options.color_support {
        if source_secure {
            Style::new().green()
        } else {
            Style::new().yellow()
        }
    } else {
        Style::new()
    };
    let source_status = if source_secure { check_ok } else { check_warn };
    let source_name = if source_secure {
        "OS CSPRNG"
    } else {
        "Time-seeded keystream"
    };

    let score_style = strength_style(result.score, options.color_support);
    let label = strength_label(result.score);

    println!("Stats:");
    println!("  ├─ Charset    {} chars", config.classes.pool_size());
    println!(
        "  ├─ Length     {} {}",
        config.length,
        if config.length == 1 { "char" } else { "chars" }
    );
    println!(
        "  ├─ Entropy    {} {}",
        result.entropy_bits,
        if result.entropy_bits == 1 {
            "bit"
        } else {
            "bits"
        }
    );
    println!("  ├─ Sampling   Unbiased rejection");
    println!(
        "  ├─ Source     {} {}",
        source_style.apply_to(format!("[{}]", source_status)),
        source_style.apply_to(source_name)
    );
    println!(
        "  └─ Strength   {} {}%",
        score_style.apply_to(render_bar(result.score, options.unicode_support)),
        score_style.apply_to(result.score)
    );

    println!(
        "\n{} Security: {}",
        score_style.apply_to(format!(
            "[{}]",
            if result.score >= FAIR_SCORE {
                check_ok
            } else {
                check_warn
            }
        )),
        score_style.apply_to(label)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_status_symbols_unicode() {
        let (ok, warn) = get_status_symbols(true);
        assert_eq!(ok, "✓");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_get_status_symbols_ascii() {
        let (ok, warn) = get_status_symbols(false);
        assert_eq!(ok, "+");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(strength_label(0), "Weak");
        assert_eq!(strength_label(39), "Weak");
        assert_eq!(strength_label(40), "Fair");
        assert_eq!(strength_label(69), "Fair");
        assert_eq!(strength_label(70), "Strong");
        assert_eq!(strength_label(100), "Strong");
    }

    #[test]
    fn test_bar_bounds() {
        assert_eq!(render_bar(0, false), "-".repeat(BAR_WIDTH));
        assert_eq!(render_bar(100, false), "#".repeat(BAR_WIDTH));
        assert_eq!(render_bar(100, true), "█".repeat(BAR_WIDTH));
    }

    #[test]
    fn test_bar_partial_fill() {
        let bar = render_bar(50, false);
        assert_eq!(bar.len(), BAR_WIDTH);
        assert_eq!(bar.matches('#').count(), 10);

        // Any non-zero score shows at least one filled cell.
        let sliver = render_bar(1, false);
        assert_eq!(sliver.matches('#').count(), 1);
    }
}
