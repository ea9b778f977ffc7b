pub struct RegionCode {
}

impl RegionCode {
    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        return Self::zz();
    }

    pub fn zz() -> &'static str {
        return "ZZ";    
    }

    /// Returns the region code used for non-geographical entities such as
    /// international toll free numbers (+800).
    pub fn un001() -> &'static str {
        return "001";
    }
}
