//! Departments and the channels they listen on

use crate::messaging::Channel;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Hr,
    Finance,
    It,
    Research,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Hr,
        Department::Finance,
        Department::It,
        Department::Research,
    ];

    /// Queue name the department's service consumes
    pub fn channel_name(self) -> &'static str {
        match self {
            Department::Hr => "HR_SERVICE: EMAIL_CREATED",
            Department::Finance => "FINANCE_SERVICE: EMAIL_CREATED",
            Department::It => "IT_SERVICE: EMAIL_CREATED",
            Department::Research => "RESEARCH_SERVICE: EMAIL_CREATED",
        }
    }

    pub fn channel(self) -> Channel {
        Channel::new(self.channel_name())
    }

    /// Name used in service log lines
    pub fn label(self) -> &'static str {
        match self {
            Department::Hr => "HR",
            Department::Finance => "FINANCE",
            Department::It => "IT",
            Department::Research => "R & D",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SERVICE", self.label())
    }
}
