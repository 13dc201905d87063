//! Terminal view
//!
//! Frames go to a renderer thread over a one-slot channel. If the renderer
//! is still busy with the previous frame the new one is skipped, so
//! `display` never blocks the driver.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, log_enabled, warn, Level};

use super::{Frame, View};
use crate::simulation::states::Boundary;

const GRID_W: usize = 48; // plot columns
const GRID_H: usize = 24; // plot rows

pub struct ConsoleView {
    tx: Option<Sender<Frame>>,
    renderer: Option<JoinHandle<u64>>,
    skipped: AtomicU64,
}

impl ConsoleView {
    /// Spawn the renderer; it logs a status line every `report_every` frames
    pub fn spawn(report_every: u64) -> std::io::Result<Self> {
        let (tx, rx) = bounded(1);
        let renderer = thread::Builder::new()
            .name("rbsim-render".into())
            .spawn(move || render_loop(rx, report_every.max(1)))?;
        Ok(Self {
            tx: Some(tx),
            renderer: Some(renderer),
            skipped: AtomicU64::new(0),
        })
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Close the channel, wait for the renderer and return how many frames it drew
    pub fn close(mut self) -> u64 {
        self.finish()
    }

    fn finish(&mut self) -> u64 {
        self.tx.take();
        match self.renderer.take().map(JoinHandle::join) {
            Some(Ok(rendered)) => rendered,
            Some(Err(_)) => {
                warn!("renderer thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl View for ConsoleView {
    fn display(&self, frame: Frame) {
        let Some(tx) = &self.tx else { return };
        match tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Disconnected(_)) => warn!("renderer gone, dropping frame"),
        }
    }
}

impl Drop for ConsoleView {
    fn drop(&mut self) {
        self.finish();
    }
}

fn render_loop(rx: Receiver<Frame>, report_every: u64) -> u64 {
    let mut rendered = 0;
    for frame in rx.iter() {
        rendered += 1;
        if frame.iteration % report_every == 0 {
            info!("{}", status_line(&frame));
            if log_enabled!(Level::Debug) {
                debug!("\n{}", plot(&frame));
            }
        }
    }
    rendered
}

/// `Bodies: n - vt: t - nIter: i` plus the population's bounding box
pub fn status_line(frame: &Frame) -> String {
    let mut line = format!(
        "Bodies: {} - vt: {:.2} - nIter: {}",
        frame.bodies.len(),
        frame.virtual_time,
        frame.iteration
    );
    if let Some((lo, hi)) = extent(frame) {
        line.push_str(&format!(" - extent: ({:.2}, {:.2})..({:.2}, {:.2})", lo.0, lo.1, hi.0, hi.1));
    }
    line
}

fn extent(frame: &Frame) -> Option<((f64, f64), (f64, f64))> {
    let first = frame.bodies.first()?;
    let init = ((first.x.x, first.x.y), (first.x.x, first.x.y));
    Some(frame.bodies.iter().fold(init, |(lo, hi), b| {
        (
            (lo.0.min(b.x.x), lo.1.min(b.x.y)),
            (hi.0.max(b.x.x), hi.1.max(b.x.y)),
        )
    }))
}

/// Rasterise the frame onto a character grid framed by the boundary
pub fn plot(frame: &Frame) -> String {
    let mut grid = vec![vec![' '; GRID_W]; GRID_H];
    for b in frame.bodies.iter() {
        if let Some((col, row)) = cell(&frame.boundary, b.x.x, b.x.y) {
            grid[row][col] = match grid[row][col] {
                ' ' => 'o',
                _ => '@',
            };
        }
    }

    let border = format!("+{}+", "-".repeat(GRID_W));
    let mut out = String::with_capacity((GRID_W + 3) * (GRID_H + 2));
    out.push_str(&border);
    for row in grid {
        out.push('\n');
        out.push('|');
        out.extend(row);
        out.push('|');
    }
    out.push('\n');
    out.push_str(&border);
    out
}

fn cell(boundary: &Boundary, x: f64, y: f64) -> Option<(usize, usize)> {
    let u = (x - boundary.x0()) / boundary.width();
    let v = (boundary.y1() - y) / boundary.height(); // row 0 is the top edge
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }
    let col = ((u * GRID_W as f64) as usize).min(GRID_W - 1);
    let row = ((v * GRID_H as f64) as usize).min(GRID_H - 1);
    Some((col, row))
}
