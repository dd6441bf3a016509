pub trait Stats {
    fn record_node_expanded(&mut self);
    fn record_state_scored(&mut self);
}

#[derive(Debug, Default)]
pub struct NullStats;

impl Stats for NullStats {
    fn record_node_expanded(&mut self) {}
    fn record_state_scored(&mut self) {}
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct SimpleStats {
    pub node_expanded_count: u64,
    pub state_scored_count: u64,
}

impl SimpleStats {
    pub fn nodes_visited(&self) -> u64 {
        self.node_expanded_count + self.state_scored_count
    }
}

impl Stats for SimpleStats {
    fn record_node_expanded(&mut self) {
        self.node_expanded_count += 1;
    }

    fn record_state_scored(&mut self) {
        self.state_scored_count += 1;
    }
}
