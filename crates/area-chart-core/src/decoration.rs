// File: crates/area-chart-core/src/decoration.rs
// Summary: Decoration trait and the tagged child declarations a chart is composed from.

use crate::context::ChartComputedState;
use crate::scene::Scene;
use crate::series::SeriesDecl;

/// A caller-declared visual element drawn from the chart's computed state.
pub trait Decoration {
    fn id(&self) -> &'static str;

    /// Series declaration carried by this element, if any.
    fn series(&self) -> Option<SeriesDecl> {
        None
    }

    fn render(&self, ctx: &ChartComputedState<'_>, scene: &mut Scene);
}

/// Role tag of a declared child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Plotted series; drawn beneath the pointer-capture layer.
    Series,
    /// Base decoration (grid, bands); drawn beneath the pointer-capture layer.
    DecorationUnder,
    /// Marker-type decoration; drawn above the pointer-capture layer.
    DecorationOver,
}

/// One declared child of a chart.
pub struct ChartChild {
    role: Role,
    element: Box<dyn Decoration>,
}

impl ChartChild {
    pub fn new(role: Role, element: impl Decoration + 'static) -> Self {
        Self { role, element: Box::new(element) }
    }

    pub fn series(element: impl Decoration + 'static) -> Self {
        Self::new(Role::Series, element)
    }

    pub fn under(element: impl Decoration + 'static) -> Self {
        Self::new(Role::DecorationUnder, element)
    }

    pub fn over(element: impl Decoration + 'static) -> Self {
        Self::new(Role::DecorationOver, element)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn element(&self) -> &dyn Decoration {
        self.element.as_ref()
    }

    /// Whether this child is drawn above the pointer-capture layer.
    pub fn is_over_layer(&self) -> bool {
        self.role == Role::DecorationOver
    }

    /// Series declaration for this child: series-tagged children and,
    /// as a fallback, any decoration that exposes a non-empty data key.
    pub fn series_decl(&self) -> Option<SeriesDecl> {
        let decl = self.element.series()?;
        match self.role {
            Role::Series => Some(decl),
            Role::DecorationUnder | Role::DecorationOver => {
                (!decl.data_key.is_empty()).then_some(decl)
            }
        }
    }
}

impl std::fmt::Debug for ChartChild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartChild")
            .field("role", &self.role)
            .field("element", &self.element.id())
            .finish()
    }
}
