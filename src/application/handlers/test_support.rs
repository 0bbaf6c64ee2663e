//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::{FixedClock, InMemoryStore};
use crate::domain::foundation::{MemberId, Money, PlanId, Timestamp};
use crate::domain::membership::{Member, MemberProfile, Plan, PlanDuration, ResetFromNow};
use crate::ports::{Clock, MemberRepository, PlanRepository};

pub fn ts(y: i32, m: u32, d: u32) -> Timestamp {
    Timestamp::from_ymd_hms(y, m, d, 9, 0, 0).unwrap()
}

pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedClock>,
}

impl Fixture {
    pub fn at(now: Timestamp) -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            clock: Arc::new(FixedClock::at(now)),
        }
    }

    pub async fn plan(&self, name: &str, duration: PlanDuration, cents: i64) -> Plan {
        let plan = Plan::new(
            PlanId::new(),
            name,
            duration,
            Money::from_cents(cents).unwrap(),
            format!("{} access", name),
            self.clock.now(),
        )
        .unwrap();
        PlanRepository::insert(self.store.as_ref(), &plan).await.unwrap();
        plan
    }

    pub async fn member(&self, email: &str, plan: &Plan) -> Member {
        let profile = MemberProfile::new("Test", "Member", email, None, None).unwrap();
        let member =
            Member::register(MemberId::new(), profile, plan, self.clock.now(), &ResetFromNow).unwrap();
        MemberRepository::insert(self.store.as_ref(), &member).await.unwrap();
        member
    }

    pub async fn reload(&self, id: &MemberId) -> Member {
        MemberRepository::find_by_id(self.store.as_ref(), id)
            .await
            .unwrap()
            .unwrap()
    }
}
