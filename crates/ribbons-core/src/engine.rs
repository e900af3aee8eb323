use ribbons_platform::{DiskId, RenderSink};
use tracing::info;

use crate::chain::PointChainTrail;
use crate::config::{ChainConfig, EngineConfig, RibbonConfig};
use crate::mesh::LayerPair;
use crate::meter::ThroughputMeter;
use crate::ribbon::{RibbonBinding, RibbonTrail};

struct BoundRibbon {
    trail: RibbonTrail,
    binding: RibbonBinding,
}

struct BoundChain {
    trail: PointChainTrail,
    disks: Vec<LayerPair<DiskId>>,
}

/// Owns every live trail together with its sink handles and drives them one
/// frame at a time. Trails are independent; the order they advance in does
/// not matter.
pub struct TrailEngine {
    pub config: EngineConfig,
    ribbons: Vec<BoundRibbon>,
    chains: Vec<BoundChain>,
    meter: Option<ThroughputMeter>,
    frame: u64,
}

impl TrailEngine {
    pub fn new(config: EngineConfig) -> Self {
        let meter = config.throughput_interval.map(ThroughputMeter::logging);
        Self {
            config,
            ribbons: Vec::new(),
            chains: Vec::new(),
            meter,
            frame: 0,
        }
    }

    /// Replaces the throughput hook.
    pub fn set_meter(&mut self, meter: Option<ThroughputMeter>) {
        self.meter = meter;
    }

    /// Spawns every trail the config describes.
    ///
    /// All trails are built first, so an invalid config leaves both the engine
    /// and `sink` untouched. A sink error while attaching can leave the visuals
    /// created so far behind in it.
    pub fn populate(&mut self, sink: &mut dyn RenderSink) -> ribbons_platform::Result<()> {
        let ribbons = self
            .config
            .bursts
            .iter()
            .flat_map(|burst| burst.ribbon_configs())
            .chain(self.config.ribbons.iter().cloned())
            .map(RibbonTrail::new)
            .collect::<crate::error::Result<Vec<_>>>()?;
        let chains = self
            .config
            .chains
            .iter()
            .cloned()
            .map(PointChainTrail::new)
            .collect::<crate::error::Result<Vec<_>>>()?;

        for trail in ribbons {
            self.bind_ribbon(trail, sink)?;
        }
        for trail in chains {
            self.bind_chain(trail, sink)?;
        }
        info!(
            "engine populated: {} ribbons, {} chains",
            self.ribbons.len(),
            self.chains.len()
        );
        Ok(())
    }

    pub fn spawn_ribbon(
        &mut self,
        config: RibbonConfig,
        sink: &mut dyn RenderSink,
    ) -> ribbons_platform::Result<()> {
        self.bind_ribbon(RibbonTrail::new(config)?, sink)
    }

    fn bind_ribbon(
        &mut self,
        trail: RibbonTrail,
        sink: &mut dyn RenderSink,
    ) -> ribbons_platform::Result<()> {
        let binding = trail.attach(sink)?;
        self.ribbons.push(BoundRibbon { trail, binding });
        Ok(())
    }

    pub fn spawn_chain(
        &mut self,
        config: ChainConfig,
        sink: &mut dyn RenderSink,
    ) -> ribbons_platform::Result<()> {
        self.bind_chain(PointChainTrail::new(config)?, sink)
    }

    fn bind_chain(
        &mut self,
        trail: PointChainTrail,
        sink: &mut dyn RenderSink,
    ) -> ribbons_platform::Result<()> {
        let disks = trail.attach(sink)?;
        self.chains.push(BoundChain { trail, disks });
        Ok(())
    }

    /// Advances every trail one frame and hands the results to `sink`.
    pub fn advance(&mut self, sink: &mut dyn RenderSink) {
        for bound in &mut self.ribbons {
            bound.trail.advance();
            bound.trail.present(&bound.binding, sink);
        }
        for bound in &mut self.chains {
            bound.trail.advance();
            bound.trail.present(&bound.disks, sink);
        }
        self.frame += 1;
        if let Some(meter) = &mut self.meter {
            meter.tick();
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn ribbons(&self) -> impl Iterator<Item = &RibbonTrail> {
        self.ribbons.iter().map(|bound| &bound.trail)
    }

    pub fn chains(&self) -> impl Iterator<Item = &PointChainTrail> {
        self.chains.iter().map(|bound| &bound.trail)
    }

    pub fn ribbon_count(&self) -> usize {
        self.ribbons.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }
}
