//! ASCII rendering of published frames.

use magworld_core::{BlindView, BodyKind, BodyView, Direction, Offset, RenderFrame, TickOutput};

use crate::config::ViewportConfig;

struct Canvas {
    origin: Offset,
    width: i32,
    height: i32,
    cells: Vec<char>,
}

impl Canvas {
    fn new(origin: Offset, width: i32, height: i32) -> Self {
        Self {
            origin,
            width,
            height,
            cells: vec!['.'; (width * height).max(0) as usize],
        }
    }

    fn put(&mut self, at: Offset, ch: char) {
        let x = at.x - self.origin.x;
        let y = at.y - self.origin.y;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.cells[(y * self.width + x) as usize] = ch;
    }

    fn finish(self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

fn glyph(body: &BodyView, agent: bool) -> char {
    if agent {
        return '@';
    }
    if body.kind == BodyKind::Fixed {
        return '#';
    }
    let initial = body.name.chars().next().unwrap_or('?');
    if body.held {
        initial.to_ascii_uppercase()
    } else {
        initial.to_ascii_lowercase()
    }
}

/// Inclusive min/max corners; the origin for an empty set.
fn extent(cells: &[Offset]) -> (Offset, Offset) {
    let Some(first) = cells.first() else {
        return (Offset::new(0, 0), Offset::new(0, 0));
    };
    let (mut min, mut max) = (*first, *first);
    for c in cells {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }
    (min, max)
}

fn center(cells: &[Offset]) -> Offset {
    let (min, max) = extent(cells);
    Offset::new((min.x + max.x) / 2, (min.y + max.y) / 2)
}

/// Window of the world around the agent. Later bodies paint over earlier ones; the agent last.
pub fn render_full(bodies: &[BodyView], agent: &BodyView, viewport: ViewportConfig) -> String {
    let mid = agent.position.cell(center(&agent.cells));
    let width = viewport.width as i32;
    let height = viewport.height as i32;
    let mut canvas = Canvas::new(mid.shifted(-width / 2, -height / 2), width, height);

    for body in bodies.iter().filter(|b| b.id != agent.id) {
        let ch = glyph(body, false);
        for cell in body.world_cells() {
            canvas.put(cell, ch);
        }
    }
    for cell in agent.world_cells() {
        canvas.put(cell, glyph(agent, true));
    }
    canvas.finish()
}

/// Agent outline with touch, motion and magnetism markers; nothing else of the world.
pub fn render_blind(view: &BlindView) -> String {
    let cells = &view.agent_cells;
    let (min, max) = extent(cells);
    let mid = center(cells);
    let mut canvas = Canvas::new(min.shifted(-1, -1), max.x - min.x + 3, max.y - min.y + 3);

    for c in cells {
        canvas.put(*c, '@');
    }

    let touch_at = |dir: Direction| match dir {
        Direction::West => Offset::new(min.x - 1, mid.y),
        Direction::East => Offset::new(max.x + 1, mid.y),
        Direction::North => Offset::new(mid.x, min.y - 1),
        Direction::South => Offset::new(mid.x, max.y + 1),
    };
    for dir in Direction::ALL {
        if view.touch.get(dir) {
            canvas.put(touch_at(dir), 'o');
        }
    }

    match view.motion {
        Some(Direction::West) => canvas.put(Offset::new(min.x + 2, mid.y), '<'),
        Some(Direction::East) => canvas.put(Offset::new(max.x - 2, mid.y), '>'),
        Some(Direction::North) => canvas.put(Offset::new(mid.x, min.y + 2), '^'),
        Some(Direction::South) => canvas.put(Offset::new(mid.x, max.y - 2), 'v'),
        None if view.moving => canvas.put(mid, '*'),
        None => {}
    }

    if view.magnetism {
        canvas.put(mid, 'M');
    }
    canvas.finish()
}

pub fn render_frame(output: &TickOutput, viewport: ViewportConfig) -> String {
    match output.snapshot.frame(output.blind) {
        RenderFrame::Blind(view) => render_blind(&view),
        RenderFrame::Full { bodies } => match output.snapshot.agent_view() {
            Some(agent) => render_full(&bodies, agent, viewport),
            None => String::new(),
        },
    }
}

/// Per-tick effector and sensor summary.
pub fn status_line(output: &TickOutput) -> String {
    let sensors = &output.snapshot.sensors;
    format!(
        "Timestep: {:4}     Effectors: {:2} {:2} {}     Sensors: {:2} {:2} {}",
        output.report.tick,
        output.next.motion.dx,
        output.next.motion.dy,
        u8::from(sensors.magnetism),
        sensors.realized.dx,
        sensors.realized.dy,
        sensors.touch,
    )
}
