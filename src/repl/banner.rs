use console::{style, Term};
use tui_banner::{Align, Banner, ColorMode, Fill, Gradient, GradientDirection, Palette};

const BRAND: u8 = 39; // deep sky blue
const BRAND_DIM: u8 = 24;
const DIM: u8 = 240;

const TAGLINE: &str = "Advanced Risk Intelligence Dashboard";

/// Print the startup banner and quick-start guide.
pub fn show_splash() {
    let term = Term::stdout();
    let (_, term_cols) = term.size();
    let term_w = term_cols as usize;

    let center = |text_w: usize| -> String {
        if term_w > text_w + 4 {
            " ".repeat((term_w - text_w) / 2)
        } else {
            "  ".to_string()
        }
    };

    let palette = Palette::from_hex(&["#AFD7FF", "#3498DB", "#1F618D", "#154360"]);
    let gradient = Gradient::new(palette.colors().to_vec(), GradientDirection::Diagonal);

    let banner_text = match Banner::new("RISKDECK") {
        Ok(b) => b
            .gradient(gradient)
            .fill(Fill::Keep)
            .align(Align::Center)
            .trim_vertical(true)
            .color_mode(ColorMode::TrueColor)
            .width(term_w)
            .render(),
        Err(_) => format!("{}{}\n", center(8), style("RISKDECK").color256(BRAND).bold()),
    };

    println!();
    print!("{}", banner_text);

    let version_str = format!("v{}", env!("CARGO_PKG_VERSION"));
    println!("{}{}", center(version_str.len()), style(version_str).color256(DIM));

    let scene_w = term_w.clamp(40, 76);
    let rule = style("\u{2500}".repeat(scene_w)).color256(BRAND_DIM);
    println!("{}{}", center(scene_w), rule);
    println!("{}{}", center(TAGLINE.len()), style(TAGLINE).white().bold());
    println!("{}{}", center(scene_w), rule);
    println!();

    let guide: &[(&str, &str)] = &[
        ("/scan [kind]", "Run a simulated scan"),
        ("/query <text>", "Submit a security query"),
        ("/view <name|1-6>", "Switch views"),
        ("<any text>", "Ask the assistant"),
        ("/help", "List all commands"),
    ];
    let p = center(56);
    println!("{}  {}", p, style("Quick Start:").white().bold());
    println!();
    for (cmd, desc) in guide {
        println!("{}    {:<20} {}", p, style(cmd).color256(BRAND), style(desc).dim());
    }
    println!();
}
