//! Follows a looped path and prints position and event firings per step.
//!
//! ```text
//! cargo run --example follow              # default speed 3.0
//! cargo run --example follow -- 7.5       # custom speed
//! RUST_LOG=hermite_path=debug cargo run --example follow
//! ```

use std::rc::Rc;

use hermite_path::math::{Point2, Vector2};
use hermite_path::{ControlPoint, EventHandler, Path, PathConfig, PathFollower, TriggerContext};

/// Prints a line whenever the follower crosses its marker.
struct Announce {
    label: &'static str,
}

impl EventHandler for Announce {
    fn on_triggered(&self, t: f64, context: &TriggerContext) {
        println!(
            "  [{}] event {} at {:.2} fired (cursor {t:.2}, pos {:.2}, {:.2})",
            self.label, context.event_index, context.position_on_path, context.pos.x, context.pos.y
        );
    }
}

fn main() -> hermite_path::Result<()> {
    // Default: WARN for everything, INFO for hermite_path.
    // Override with RUST_LOG env var (e.g. RUST_LOG=hermite_path=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("hermite_path=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let speed = std::env::args()
        .nth(1)
        .and_then(|a| a.parse::<f64>().ok())
        .unwrap_or(3.0);

    let mut path = Path::new(PathConfig::default())?;
    {
        let mut batch = path.batch();
        batch.push(
            ControlPoint::new(Point2::new(0.0, 0.0))
                .with_handles(Vector2::new(0.0, -6.0), Vector2::new(0.0, 6.0)),
        );
        batch.push(
            ControlPoint::new(Point2::new(10.0, 8.0))
                .with_handles(Vector2::new(6.0, 0.0), Vector2::new(6.0, 0.0)),
        );
        batch.push(
            ControlPoint::new(Point2::new(20.0, 0.0))
                .with_handles(Vector2::new(0.0, -6.0), Vector2::new(0.0, -6.0)),
        );
    }

    let total = path.total_length();
    path.add_event(total * 0.25, Rc::new(Announce { label: "quarter" }));
    path.add_event(total * 0.75, Rc::new(Announce { label: "three quarters" }));

    println!(
        "path: {} sections, {} cached points, length {total:.3}",
        path.cache().section_count(),
        path.cache().point_count()
    );

    let mut follower = PathFollower::new(speed, 0.0);
    follower.start(&mut path);
    let mut elapsed = 0.0;
    while follower.cursor(elapsed) <= total {
        let s = follower.advance(&path, elapsed);
        println!(
            "t={:6.2}  pos=({:6.2}, {:6.2})  tangent=({:5.2}, {:5.2})",
            follower.previous_t(),
            s.pos.x,
            s.pos.y,
            s.tangent.x,
            s.tangent.y
        );
        elapsed += 1.0;
    }

    Ok(())
}
