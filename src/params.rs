/// Elmore RC parameters of a unit length of routed wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireParams {
    /// Resistance per unit length.
    pub r_per_unit: f64,
    /// Capacitance per unit length.
    pub c_per_unit: f64,
}

/// Parameters of the single buffer (repeater) cell type the engine may
/// insert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferParams {
    /// Input capacitance presented to whatever drives this buffer.
    pub c_in: f64,
    /// Output drive resistance, used to compute the delay across the
    /// downstream load the buffer drives.
    pub r_drive: f64,
    /// Fixed delay contributed by the buffer itself, independent of load.
    pub intrinsic_delay: f64,
}
