use std::ops::{BitOr, Range, RangeBounds, RangeFrom, RangeTo};

use bitflags::bitflags;

use crate::{
    error::ConfigError,
    query::{QueryDescriptor, QuerySet},
};

bitflags! {
  #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash)]
  #[must_use]
  pub struct SizeFlags: u16 {
    const XS = 1;
    const SM = 2;
    const MD = 4;
    const LG = 8;
    const XL = 16;
    const XXL = 32;
  }
}

/// A named width breakpoint, smallest first.
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "xxl",
        }
    }

    /// The capitalized form used in prop names, e.g. `Md` in `areasMd`.
    pub fn suffix(self) -> &'static str {
        match self {
            Breakpoint::Xs => "Xs",
            Breakpoint::Sm => "Sm",
            Breakpoint::Md => "Md",
            Breakpoint::Lg => "Lg",
            Breakpoint::Xl => "Xl",
            Breakpoint::Xxl => "Xxl",
        }
    }

    fn flag(self) -> SizeFlags {
        match self {
            Breakpoint::Xs => SizeFlags::XS,
            Breakpoint::Sm => SizeFlags::SM,
            Breakpoint::Md => SizeFlags::MD,
            Breakpoint::Lg => SizeFlags::LG,
            Breakpoint::Xl => SizeFlags::XL,
            Breakpoint::Xxl => SizeFlags::XXL,
        }
    }
}

/// How a breakpoint-specific value extends to the neighbouring breakpoints.
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum Behavior {
    /// The breakpoint and everything wider.
    #[default]
    Up,
    /// The breakpoint and everything narrower.
    Down,
    /// Just the breakpoint.
    Only,
}

impl Behavior {
    pub fn from_suffix(suffix: &str) -> Option<Behavior> {
        match suffix {
            "Up" => Some(Behavior::Up),
            "Down" => Some(Behavior::Down),
            "Only" => Some(Behavior::Only),
            _ => None,
        }
    }
}

/// Width breakpoints in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct GridBreakpoints {
    xs: RangeTo<f64>,
    sm: Range<f64>,
    md: Range<f64>,
    lg: Range<f64>,
    xl: Range<f64>,
    xxl: RangeFrom<f64>,
}

impl Default for GridBreakpoints {
    fn default() -> Self {
        Self {
            xs: ..576.0,
            sm: 576.0..768.0,
            md: 768.0..992.0,
            lg: 992.0..1200.0,
            xl: 1200.0..1400.0,
            xxl: 1400.0..,
        }
    }
}

impl GridBreakpoints {
    /// Build breakpoints from the minimum widths of `sm` through `xxl`.
    pub fn new(sm: f64, md: f64, lg: f64, xl: f64, xxl: f64) -> Result<Self, ConfigError> {
        let widths = [sm, md, lg, xl, xxl];
        let increasing = widths.windows(2).all(|pair| pair[0] < pair[1]);
        if !(sm > 0.0 && increasing) {
            return Err(ConfigError::UnorderedBreakpoints { widths });
        }
        Ok(Self {
            xs: ..sm,
            sm: sm..md,
            md: md..lg,
            lg: lg..xl,
            xl: xl..xxl,
            xxl: xxl..,
        })
    }

    pub fn breakpoint_for_width(&self, width: f64) -> Breakpoint {
        if self.xs.contains(&width) {
            return Breakpoint::Xs;
        }
        if self.sm.contains(&width) {
            return Breakpoint::Sm;
        }
        if self.md.contains(&width) {
            return Breakpoint::Md;
        }
        if self.lg.contains(&width) {
            return Breakpoint::Lg;
        }
        if self.xl.contains(&width) {
            return Breakpoint::Xl;
        }
        if self.xxl.contains(&width) {
            return Breakpoint::Xxl;
        }

        // Only NaN gets here, `new` rejects ranges with gaps.
        Breakpoint::Xs
    }

    /// Inclusive `(min, max)` pixel bounds of a breakpoint; open ends are `None`.
    ///
    /// The max sits 0.02px below the next breakpoint so fractional widths
    /// still fall into one of them.
    pub fn bounds(&self, bp: Breakpoint) -> (Option<f64>, Option<f64>) {
        // Computed on hundredths so the bound prints as e.g. `767.98`.
        let max_below = |end: f64| Some((end * 100.0 - 2.0) / 100.0);
        match bp {
            Breakpoint::Xs => (None, max_below(self.xs.end)),
            Breakpoint::Sm => (Some(self.sm.start), max_below(self.sm.end)),
            Breakpoint::Md => (Some(self.md.start), max_below(self.md.end)),
            Breakpoint::Lg => (Some(self.lg.start), max_below(self.lg.end)),
            Breakpoint::Xl => (Some(self.xl.start), max_below(self.xl.end)),
            Breakpoint::Xxl => (Some(self.xxl.start), None),
        }
    }

    /// The descriptor matching `bp` extended by `behavior`.
    ///
    /// `Xs` up and `Xxl` down cover every width and compile to an empty query.
    pub fn query(&self, bp: Breakpoint, behavior: Behavior) -> QueryDescriptor {
        let (min, max) = self.bounds(bp);
        let (min, max) = match behavior {
            Behavior::Up => (min, None),
            Behavior::Down => (None, max),
            Behavior::Only => (min, max),
        };
        QueryDescriptor::new()
            .with_optional("minWidth", min)
            .with_optional("maxWidth", max)
    }

    /// Descriptors covering exactly the breakpoints in `size`.
    ///
    /// Adjacent breakpoints are merged, so `XS | SM | LG` yields two descriptors.
    pub fn query_for(&self, size: ScreenSize) -> QuerySet {
        let mut set = QuerySet::new();
        let mut run: Option<(Breakpoint, Breakpoint)> = None;
        for bp in Breakpoint::ALL {
            match (size.contains(bp), run) {
                (true, Some((first, _))) => run = Some((first, bp)),
                (true, None) => run = Some((bp, bp)),
                (false, Some((first, last))) => {
                    set.push(self.span(first, last));
                    run = None;
                }
                (false, None) => {}
            }
        }
        if let Some((first, last)) = run {
            set.push(self.span(first, last));
        }
        set
    }

    fn span(&self, first: Breakpoint, last: Breakpoint) -> QueryDescriptor {
        QueryDescriptor::new()
            .with_optional("minWidth", self.bounds(first).0)
            .with_optional("maxWidth", self.bounds(last).1)
    }
}

fn next(size: ScreenSize) -> ScreenSize {
    ScreenSize {
        flags: SizeFlags::from_bits_truncate(size.flags.bits() << 1),
    }
}

fn prev(size: ScreenSize) -> ScreenSize {
    ScreenSize {
        flags: SizeFlags::from_bits_truncate(size.flags.bits() >> 1),
    }
}

/// Split a prop name like `gapMd` or `areasLgDown` into its base name, the
/// breakpoint and the behavior, if any.
pub fn split_breakpoint_suffix(name: &str) -> Option<(&str, Breakpoint, Option<Behavior>)> {
    let (rest, behavior) = ["Up", "Down", "Only"]
        .into_iter()
        .find_map(|suffix| Some((name.strip_suffix(suffix)?, Behavior::from_suffix(suffix))))
        .unwrap_or((name, None));
    Breakpoint::ALL.into_iter().find_map(|bp| {
        let base = rest.strip_suffix(bp.suffix())?;
        (!base.is_empty()).then_some((base, bp, behavior))
    })
}

pub fn range<R: RangeBounds<ScreenSize>>(range: R) -> ScreenSize {
    let start = match range.start_bound() {
        std::ops::Bound::Included(i) => *i,
        std::ops::Bound::Excluded(e) => next(*e),
        std::ops::Bound::Unbounded => ScreenSize::XS,
    };
    let end = match range.end_bound() {
        std::ops::Bound::Included(s) => *s,
        std::ops::Bound::Excluded(e) => prev(*e),
        std::ops::Bound::Unbounded => ScreenSize::XXL,
    };
    // Take the lowest flag of the start and the highest of the end so unions
    // like XS|SM|MD still describe a contiguous range.
    let (Some(lowest_start), Some(highest_end)) =
        (start.flags.iter().next(), end.flags.iter().last())
    else {
        return ScreenSize::NONE;
    };
    if highest_end.bits() < lowest_start.bits() {
        return ScreenSize::NONE;
    }

    let mask = highest_end.bits() - lowest_start.bits();
    let result = SizeFlags::from_bits_truncate(highest_end.bits() | mask | lowest_start.bits());

    ScreenSize { flags: result }
}

/// A set of breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScreenSize {
    flags: SizeFlags,
}

impl ScreenSize {
    pub const NONE: ScreenSize = ScreenSize::new(SizeFlags::empty());
    pub const XS: ScreenSize = ScreenSize::new(SizeFlags::XS);
    pub const SM: ScreenSize = ScreenSize::new(SizeFlags::SM);
    pub const MD: ScreenSize = ScreenSize::new(SizeFlags::MD);
    pub const LG: ScreenSize = ScreenSize::new(SizeFlags::LG);
    pub const XL: ScreenSize = ScreenSize::new(SizeFlags::XL);
    pub const XXL: ScreenSize = ScreenSize::new(SizeFlags::XXL);
    pub const ALL: ScreenSize = ScreenSize::new(SizeFlags::all());

    const fn new(flags: SizeFlags) -> Self {
        Self { flags }
    }

    pub const fn not(size: ScreenSize) -> Self {
        let flags = SizeFlags::all().difference(size.flags);
        Self { flags }
    }

    pub fn of(bp: Breakpoint) -> Self {
        Self::new(bp.flag())
    }

    /// The breakpoints a value declared at `bp` applies to.
    pub fn for_behavior(bp: Breakpoint, behavior: Behavior) -> Self {
        let size = Self::of(bp);
        match behavior {
            Behavior::Up => range(size..),
            Behavior::Down => range(..=size),
            Behavior::Only => size,
        }
    }

    pub fn contains(&self, bp: Breakpoint) -> bool {
        self.flags.contains(bp.flag())
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of breakpoints in the set.
    pub fn len(&self) -> u32 {
        self.flags.bits().count_ones()
    }

    pub fn is_all(&self) -> bool {
        self.flags.is_all()
    }

    pub fn insert(&mut self, bp: Breakpoint) {
        self.flags.insert(bp.flag());
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        Breakpoint::ALL.into_iter().filter(|bp| self.contains(*bp))
    }
}

impl BitOr for ScreenSize {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.flags | rhs.flags)
    }
}
