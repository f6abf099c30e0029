//! Section progress shown above the form

/// Status of one section marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Position of the current section among all sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    current: usize,
    total: usize,
}

impl Progress {
    /// `current` is zero-based; it is clamped into range
    pub fn new(current: usize, total: usize) -> Self {
        Self {
            current: current.min(total.saturating_sub(1)),
            total,
        }
    }

    /// One-based step number, as displayed
    pub fn current_step(&self) -> usize {
        self.current + 1
    }

    pub fn total_steps(&self) -> usize {
        self.total
    }

    pub fn step_status(&self, index: usize) -> StepStatus {
        match index.cmp(&self.current) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }

    /// Fill ratio of the progress bar, in `0.0..=1.0`
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current_step() as f64 / self.total as f64
    }

    /// Label such as "Section 2 of 4"
    pub fn label(&self) -> String {
        format!("Section {} of {}", self.current_step(), self.total_steps())
    }
}
