//! A design session driven from the command line.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use chrono::NaiveDateTime;
use floorplan_core::{
    format_price, Catalog, Order, SceneStore, Template, ToolController, ToolOutcome,
};
use floorplan_renderer::{DrawCommand, Renderer, SvgSurface};

use crate::{CliConfig, DeviceArg, TapArg, TemplateSource};

/// Owns the store for one run and keeps a redrawn frame in sync with it.
pub struct Session {
    catalog: Catalog,
    store: SceneStore,
    controller: ToolController,
    frame: Rc<RefCell<Vec<DrawCommand>>>,
    redraws: Rc<Cell<u64>>,
}

impl Session {
    /// Start a session on an empty canvas with the built-in catalog and the
    /// sample order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial frame cannot be rendered.
    pub fn new() -> anyhow::Result<Self> {
        let mut store = SceneStore::with_seed_orders();
        let mut renderer = Renderer::default();
        let frame = Rc::new(RefCell::new(
            renderer
                .render_commands(store.scene())
                .context("initial render failed")?,
        ));
        let redraws = Rc::new(Cell::new(0));

        let (sink, counter) = (Rc::clone(&frame), Rc::clone(&redraws));
        store.subscribe(move |scene| match renderer.render_commands(scene) {
            Ok(commands) => {
                *sink.borrow_mut() = commands;
                counter.set(counter.get() + 1);
            }
            Err(e) => tracing::error!("redraw failed: {e}"),
        });

        Ok(Self {
            catalog: Catalog::builtin(),
            store,
            controller: ToolController::new(),
            frame,
            redraws,
        })
    }

    /// The session's store.
    #[must_use]
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Draw commands of the most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        self.frame.borrow().clone()
    }

    /// Number of redraws triggered by store mutations.
    #[must_use]
    pub fn redraws(&self) -> u64 {
        self.redraws.get()
    }

    /// Apply a configuration and write requested reports to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or a device cannot be found, or if
    /// writing output fails.
    pub fn run(&mut self, config: &CliConfig, out: &mut dyn Write) -> anyhow::Result<()> {
        self.load(&config.template)?;
        for tap in &config.taps {
            self.replay_tap(tap);
        }
        for device in &config.devices {
            self.select(device)?;
        }

        if let Some(path) = &config.output {
            self.export_svg(path)?;
            writeln!(out, "已导出 {}", path.display())?;
        }
        if config.print_quote {
            self.write_quote(out)?;
        }
        if config.submit_order {
            let order = self.submit(chrono::Local::now().naive_local());
            write_order(out, &order)?;
        }
        if config.print_commands {
            serde_json::to_writer_pretty(&mut *out, &*self.frame.borrow())
                .context("failed to write draw commands")?;
            writeln!(out)?;
        }

        tracing::info!(
            "session done: {} elements, {} redraws",
            self.store.scene().element_count(),
            self.redraws()
        );
        Ok(())
    }

    /// Replace the layout with a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be found or parsed.
    pub fn load(&mut self, source: &TemplateSource) -> anyhow::Result<()> {
        match source {
            TemplateSource::Empty => {}
            TemplateSource::Builtin(key) => {
                let template = match key.parse::<u32>() {
                    Ok(id) => self.catalog.template_by_id(id),
                    Err(_) => self.catalog.template_by_name(key),
                }
                .with_context(|| format!("unknown template {key:?}"))?;
                self.store.load_template(template);
                tracing::info!("loaded template {}", template.name);
            }
            TemplateSource::Solution(id) => {
                let template = self
                    .catalog
                    .solution_template(*id)
                    .with_context(|| format!("unknown solution {id}"))?;
                self.store.load_template(template);
                tracing::info!("loaded solution {id} ({})", template.name);
            }
            TemplateSource::File(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let template = Template::from_json(&json)
                    .with_context(|| format!("invalid template in {}", path.display()))?;
                self.store.load_template(&template);
                tracing::info!("loaded template from {}", path.display());
            }
        }
        Ok(())
    }

    /// Activate the tap's tool and tap.
    pub fn replay_tap(&mut self, tap: &TapArg) -> ToolOutcome {
        self.store.set_current_tool(tap.tool);
        let outcome = self.controller.apply(&mut self.store, tap.x, tap.y);
        if outcome == ToolOutcome::Ignored {
            tracing::warn!(
                "{} tap at ({}, {}) had no effect. {}",
                tap.tool.display_name(),
                tap.x,
                tap.y,
                tap.tool.guide()
            );
        }
        outcome
    }

    /// Add units of a catalog device to the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the device id is not in the catalog.
    pub fn select(&mut self, arg: &DeviceArg) -> anyhow::Result<()> {
        let device = self.catalog.device_by_id(arg.id)?;
        self.store.select_device(device);
        if arg.quantity > 1 {
            let current = self
                .store
                .selected_devices()
                .iter()
                .find(|d| d.device.id == arg.id)
                .map_or(0, |d| d.quantity);
            let target = i64::from(current) + i64::from(arg.quantity) - 1;
            self.store.update_device_quantity(arg.id, target);
        }
        Ok(())
    }

    /// File the current quote as a pending order.
    pub fn submit(&mut self, now: NaiveDateTime) -> Order {
        self.store.submit_quote(now)
    }

    /// Render the current scene to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn export_svg(&self, path: &Path) -> anyhow::Result<()> {
        let mut renderer = Renderer::default();
        let config = renderer.config().clone();
        let mut surface = SvgSurface::new(config.width, config.height);
        renderer
            .render(self.store.scene(), &mut surface)
            .context("SVG render failed")?;
        surface
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("exported {}", path.display());
        Ok(())
    }

    /// Write the price breakdown.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_quote(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let quote = self.store.quote();
        writeln!(
            out,
            "房间 {}  设备种类 {}  设备总数 {}",
            quote.room_count, quote.device_kinds, quote.device_units
        )?;
        for selected in self.store.selected_devices() {
            writeln!(
                out,
                "  {} {} ×{} @ {} = {}",
                selected.device.icon,
                selected.device.name,
                selected.quantity,
                format_price(selected.device.price),
                format_price(selected.subtotal())
            )?;
        }
        writeln!(out, "设备费用 {}", format_price(quote.device_total))?;
        writeln!(out, "设计费 {}", format_price(quote.design_fee))?;
        writeln!(out, "安装费 {}", format_price(quote.installation_fee))?;
        writeln!(out, "服务费 {}", format_price(quote.service_fee))?;
        writeln!(out, "方案总价 {}", format_price(quote.total()))
    }
}

fn write_order(out: &mut dyn Write, order: &Order) -> std::io::Result<()> {
    writeln!(
        out,
        "订单 {} {} [{}] {} {}",
        order.id,
        order.title,
        order.status.display_name(),
        order.formatted_amount(),
        order.formatted_time()
    )
}
