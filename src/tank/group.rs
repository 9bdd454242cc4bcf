#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankGroup {
    Iso,
    Poly,
}

impl TankGroup {
    pub const ALL: [TankGroup; 2] = [TankGroup::Iso, TankGroup::Poly];

    /// Tank codes carry their chemical family as a case-sensitive marker.
    pub fn of(tank_code: &str) -> Option<Self> {
        if tank_code.contains("ISO") {
            return Some(TankGroup::Iso);
        }

        if tank_code.contains("Poly") {
            return Some(TankGroup::Poly);
        }

        None
    }

    pub fn title(&self) -> &'static str {
        match self {
            TankGroup::Iso => "ISOCYANTE CHEMICAL DATA",
            TankGroup::Poly => "RAW POLYOL CHEMICAL DATA",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TankGroup::Iso => "#e74c3c",
            TankGroup::Poly => "#27ae60",
        }
    }
}
