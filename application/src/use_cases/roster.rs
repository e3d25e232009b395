//! The session's agents: one per primary role, one coach per primary role.

use buildpath_domain::{Agent, AgentRole, PrimaryRole, RoleInstructions};

/// One value per primary role.
#[derive(Debug, Clone)]
pub struct RoleSet<T> {
    planner: T,
    teacher: T,
    task_setter: T,
    reviewer: T,
}

impl<T> RoleSet<T> {
    pub fn from_fn(mut f: impl FnMut(PrimaryRole) -> T) -> Self {
        Self {
            planner: f(PrimaryRole::Planner),
            teacher: f(PrimaryRole::Teacher),
            task_setter: f(PrimaryRole::TaskSetter),
            reviewer: f(PrimaryRole::Reviewer),
        }
    }

    pub fn get(&self, role: PrimaryRole) -> &T {
        match role {
            PrimaryRole::Planner => &self.planner,
            PrimaryRole::Teacher => &self.teacher,
            PrimaryRole::TaskSetter => &self.task_setter,
            PrimaryRole::Reviewer => &self.reviewer,
        }
    }

    pub fn get_mut(&mut self, role: PrimaryRole) -> &mut T {
        match role {
            PrimaryRole::Planner => &mut self.planner,
            PrimaryRole::Teacher => &mut self.teacher,
            PrimaryRole::TaskSetter => &mut self.task_setter,
            PrimaryRole::Reviewer => &mut self.reviewer,
        }
    }

    /// `(role, value)` pairs in coaching order
    pub fn iter(&self) -> impl Iterator<Item = (PrimaryRole, &T)> {
        PrimaryRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// The four primary agents, each on its role's default tier
pub fn primary_agents() -> RoleSet<Agent> {
    RoleSet::from_fn(|role| {
        let id = AgentRole::Primary(role);
        Agent::new(id, RoleInstructions::primary(role), id.default_tier())
    })
}

/// The four coach agents, each on the tier of the role it coaches
pub fn coach_agents() -> RoleSet<Agent> {
    RoleSet::from_fn(|role| {
        let id = AgentRole::Coach(role);
        Agent::new(id, RoleInstructions::coach(role), id.default_tier())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildpath_domain::ModelTier;

    #[test]
    fn test_planner_and_its_coach_use_premium() {
        let primaries = primary_agents();
        let coaches = coach_agents();
        assert_eq!(primaries.get(PrimaryRole::Planner).tier(), ModelTier::Premium);
        assert_eq!(coaches.get(PrimaryRole::Planner).tier(), ModelTier::Premium);
        for role in [PrimaryRole::Teacher, PrimaryRole::TaskSetter, PrimaryRole::Reviewer] {
            assert_eq!(primaries.get(role).tier(), ModelTier::Standard);
            assert_eq!(coaches.get(role).tier(), ModelTier::Standard);
        }
    }

    #[test]
    fn test_agents_start_without_directive() {
        let primaries = primary_agents();
        assert!(primaries.iter().all(|(_, agent)| agent.directive().is_none()));
        assert_eq!(primaries.get(PrimaryRole::TaskSetter).name(), "task_setter");
        assert_eq!(coach_agents().get(PrimaryRole::Reviewer).name(), "reviewer_coach");
    }

    #[test]
    fn test_get_mut_targets_one_role() {
        let mut primaries = primary_agents();
        primaries.get_mut(PrimaryRole::Teacher).set_directive("Slow down");
        assert_eq!(primaries.get(PrimaryRole::Teacher).directive(), Some("Slow down"));
        assert!(primaries.get(PrimaryRole::Reviewer).directive().is_none());
    }
}
