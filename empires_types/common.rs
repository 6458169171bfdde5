use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Wood,
    Clay,
    Iron,
    Crop,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Wood,
        ResourceKind::Clay,
        ResourceKind::Iron,
        ResourceKind::Crop,
    ];
}

/// Resources and seconds needed to reach a building level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub resources: ResourceGroup,
    pub time: u32,
}

impl Cost {
    pub const fn new(wood: u32, clay: u32, iron: u32, crop: u32, time: u32) -> Self {
        Self {
            resources: ResourceGroup::new(wood, clay, iron, crop),
            time,
        }
    }
}

/// (wood, clay, iron, crop)
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup(pub u32, pub u32, pub u32, pub u32);

impl ResourceGroup {
    pub const fn new(wood: u32, clay: u32, iron: u32, crop: u32) -> Self {
        Self(wood, clay, iron, crop)
    }

    pub fn wood(&self) -> u32 {
        self.0
    }
    pub fn clay(&self) -> u32 {
        self.1
    }
    pub fn iron(&self) -> u32 {
        self.2
    }
    pub fn crop(&self) -> u32 {
        self.3
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.0,
            ResourceKind::Clay => self.1,
            ResourceKind::Iron => self.2,
            ResourceKind::Crop => self.3,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Wood => &mut self.0,
            ResourceKind::Clay => &mut self.1,
            ResourceKind::Iron => &mut self.2,
            ResourceKind::Crop => &mut self.3,
        }
    }

    /// True when every component is at least the one in `other`.
    pub fn covers(&self, other: &ResourceGroup) -> bool {
        self.0 >= other.0 && self.1 >= other.1 && self.2 >= other.2 && self.3 >= other.3
    }
}

impl core::ops::Mul<f64> for ResourceGroup {
    type Output = ResourceGroup;

    fn mul(self, rhs: f64) -> Self::Output {
        let wood = (self.0 as f64 * rhs).floor() as u32;
        let clay = (self.1 as f64 * rhs).floor() as u32;
        let iron = (self.2 as f64 * rhs).floor() as u32;
        let crop = (self.3 as f64 * rhs).floor() as u32;
        ResourceGroup(wood, clay, iron, crop)
    }
}

impl core::ops::Add for ResourceGroup {
    type Output = ResourceGroup;

    fn add(self, rhs: ResourceGroup) -> Self::Output {
        ResourceGroup(
            self.0.saturating_add(rhs.0),
            self.1.saturating_add(rhs.1),
            self.2.saturating_add(rhs.2),
            self.3.saturating_add(rhs.3),
        )
    }
}
