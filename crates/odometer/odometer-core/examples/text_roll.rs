//! Print an odometer roll as text frames.
//!
//!   cargo run -p odometer-core --example text_roll -- 123 111
//!
//! Each frame shows the foreground digit of every visible column; columns
//! still rolling show the incoming digit in brackets.

use odometer_core::{Config, RollEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let from = args.next().unwrap_or_else(|| "123".to_string());
    let to = args.next().unwrap_or_else(|| "111".to_string());

    let mut eng = RollEngine::new(Config::default())?;
    eng.set_numbers(&from, &to)?;
    let Some(run) = eng.start_animation() else {
        return Ok(());
    };
    println!("run {:?}: {from} -> {to}", run);

    let mut t = 0.0f32;
    loop {
        let out = eng.update(16.0);
        let redraw = out.invalidated();
        let animating = out.animating;
        t += 16.0;
        if redraw {
            let frame: Vec<String> = eng
                .column_states()
                .iter()
                .filter(|s| s.is_visible())
                .map(|s| {
                    if s.is_rolling() {
                        format!("{}[{}]", s.current_digit, s.next_digit)
                    } else {
                        s.current_digit.to_string()
                    }
                })
                .collect();
            println!("{t:>6.0}ms  {}", frame.join(" "));
        }
        if !animating {
            break;
        }
    }
    println!("settled on {}", eng.display_text());
    Ok(())
}
