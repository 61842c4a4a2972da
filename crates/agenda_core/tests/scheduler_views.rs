use agenda_core::{
    week_bounds, AgendaItem, ItemStore, MemoryItemStore, MemoryScheduler, OneOffItem, Priority,
    RecurringItem, Scheduler, TaskItem, WEEKDAYS,
};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

// Wednesday; its week runs Monday 2026-10-19 through Sunday 2026-10-25.
fn reference() -> NaiveDate {
    date(2026, 10, 21)
}

fn titles(items: &[AgendaItem]) -> Vec<&str> {
    items.iter().map(AgendaItem::title).collect()
}

#[test]
fn week_bounds_span_monday_to_sunday() {
    assert_eq!(
        week_bounds(reference()),
        (date(2026, 10, 19), date(2026, 10, 25))
    );
    assert_eq!(
        week_bounds(date(2026, 10, 19)),
        (date(2026, 10, 19), date(2026, 10, 25))
    );
    assert_eq!(
        week_bounds(date(2026, 10, 25)),
        (date(2026, 10, 19), date(2026, 10, 25))
    );
}

#[test]
fn recurring_item_lands_on_its_weekday_in_every_week() {
    let scheduler = Scheduler::new(
        MemoryItemStore::with_items(vec![RecurringItem::new(
            1,
            "Gym",
            "Regular",
            Weekday::Mon,
            at(8, 0),
        )]),
        MemoryItemStore::<OneOffItem>::new(),
        MemoryItemStore::<TaskItem>::new(),
    );

    for reference in [date(2026, 10, 21), date(1999, 1, 1), date(2090, 6, 15)] {
        let view = scheduler.generate_weekly_schedule(reference);
        assert_eq!(titles(view.items_for(Weekday::Mon)), vec!["Gym"]);
        assert_eq!(view.total_items(), 1);
    }
}

#[test]
fn one_off_items_on_window_edges_are_included_and_outside_excluded() {
    let scheduler = Scheduler::new(
        MemoryItemStore::<RecurringItem>::new(),
        MemoryItemStore::with_items(vec![
            OneOffItem::new(1, "before", "Special", date(2026, 10, 18), at(9, 0)),
            OneOffItem::new(2, "first day", "Special", date(2026, 10, 19), at(9, 0)),
            OneOffItem::new(3, "last day", "Special", date(2026, 10, 25), at(9, 0)),
            OneOffItem::new(4, "after", "Special", date(2026, 10, 26), at(9, 0)),
        ]),
        MemoryItemStore::<TaskItem>::new(),
    );

    let view = scheduler.generate_weekly_schedule(reference());
    assert_eq!(view.week_start(), date(2026, 10, 19));
    assert_eq!(view.week_end(), date(2026, 10, 25));
    assert_eq!(titles(view.items_for(Weekday::Mon)), vec!["first day"]);
    assert_eq!(titles(view.items_for(Weekday::Sun)), vec!["last day"]);
    assert_eq!(view.total_items(), 2);
}

#[test]
fn tasks_are_placed_on_due_weekday_after_timed_items() {
    let scheduler = Scheduler::new(
        MemoryItemStore::with_items(vec![RecurringItem::new(
            1,
            "Standup",
            "Regular",
            Weekday::Fri,
            at(9, 30),
        )]),
        MemoryItemStore::with_items(vec![OneOffItem::new(
            2,
            "Dinner",
            "Special",
            date(2026, 10, 23),
            at(19, 0),
        )]),
        MemoryItemStore::with_items(vec![
            TaskItem::new(3, "Report", "Task", date(2026, 10, 23)).with_priority(Priority::Low),
            TaskItem::new(4, "Taxes", "Task", date(2026, 10, 23)).with_priority(Priority::High),
            TaskItem::new(5, "Next week", "Task", date(2026, 10, 30)),
        ]),
    );

    let view = scheduler.generate_weekly_schedule(reference());
    assert_eq!(
        titles(view.items_for(Weekday::Fri)),
        vec!["Standup", "Dinner", "Taxes", "Report"]
    );
    assert_eq!(view.date_of(Weekday::Fri), date(2026, 10, 23));
    assert_eq!(view.total_items(), 4);
}

#[test]
fn day_view_orders_recurring_one_off_then_task() {
    let today = date(2026, 10, 19);
    let scheduler = Scheduler::new(
        MemoryItemStore::with_items(vec![RecurringItem::new(
            1,
            "Gym",
            "Personal",
            Weekday::Mon,
            at(8, 0),
        )]),
        MemoryItemStore::with_items(vec![OneOffItem::new(
            2,
            "Concert",
            "Entertainment",
            today,
            at(19, 0),
        )]),
        MemoryItemStore::with_items(vec![
            TaskItem::new(3, "Homework", "School", today).with_priority(Priority::High)
        ]),
    );

    let items = scheduler.agendas_for_day(today);
    assert_eq!(titles(&items), vec!["Gym", "Concert", "Homework"]);
    assert!(matches!(items[0], AgendaItem::Regular(_)));
    assert!(matches!(items[1], AgendaItem::Special(_)));
    assert!(matches!(items[2], AgendaItem::Task(_)));
}

#[test]
fn day_view_uses_exact_date_match() {
    let today = date(2026, 10, 20);
    let scheduler = Scheduler::new(
        MemoryItemStore::with_items(vec![RecurringItem::new(
            1,
            "Gym",
            "Regular",
            Weekday::Mon,
            at(8, 0),
        )]),
        MemoryItemStore::with_items(vec![OneOffItem::new(
            2,
            "Yesterday",
            "Special",
            date(2026, 10, 19),
            at(8, 0),
        )]),
        MemoryItemStore::with_items(vec![TaskItem::new(3, "Due", "Task", today)]),
    );

    assert_eq!(titles(&scheduler.agendas_for_day(today)), vec!["Due"]);
}

#[test]
fn same_time_items_keep_store_order() {
    let scheduler = Scheduler::new(
        MemoryItemStore::with_items(vec![
            RecurringItem::new(7, "zeta", "Regular", Weekday::Tue, at(10, 0)),
            RecurringItem::new(2, "alpha", "Regular", Weekday::Tue, at(10, 0)),
        ]),
        MemoryItemStore::<OneOffItem>::new(),
        MemoryItemStore::<TaskItem>::new(),
    );

    let view = scheduler.generate_weekly_schedule(reference());
    assert_eq!(titles(view.items_for(Weekday::Tue)), vec!["zeta", "alpha"]);
}

#[test]
fn upcoming_tasks_filter_inclusive_window_and_sort_by_due_then_priority() {
    let today = reference();
    let scheduler = Scheduler::new(
        MemoryItemStore::<RecurringItem>::new(),
        MemoryItemStore::<OneOffItem>::new(),
        MemoryItemStore::with_items(vec![
            TaskItem::new(1, "overdue", "Task", date(2026, 10, 20)),
            TaskItem::new(2, "tomorrow low", "Task", date(2026, 10, 22))
                .with_priority(Priority::Low),
            TaskItem::new(3, "tomorrow high", "Task", date(2026, 10, 22))
                .with_priority(Priority::High),
            TaskItem::new(4, "today odd", "Task", today)
                .with_priority(Priority::from_code('?')),
            TaskItem::new(5, "deadline", "Task", date(2026, 10, 28)),
            TaskItem::new(6, "too late", "Task", date(2026, 10, 29)),
        ]),
    );

    let upcoming = scheduler.upcoming_tasks(today, 7);
    let titles: Vec<&str> = upcoming.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["today odd", "tomorrow high", "tomorrow low", "deadline"]
    );
}

#[test]
fn upcoming_tasks_with_zero_days_only_returns_today() {
    let today = reference();
    let scheduler = Scheduler::new(
        MemoryItemStore::<RecurringItem>::new(),
        MemoryItemStore::<OneOffItem>::new(),
        MemoryItemStore::with_items(vec![
            TaskItem::new(1, "today", "Task", today),
            TaskItem::new(2, "tomorrow", "Task", date(2026, 10, 22)),
        ]),
    );

    let upcoming = scheduler.upcoming_tasks(today, 0);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, 1);
}

#[test]
fn empty_stores_produce_empty_views() {
    let scheduler = MemoryScheduler::in_memory();

    let view = scheduler.generate_weekly_schedule(reference());
    let weekdays: Vec<Weekday> = view.iter().map(|(weekday, _)| weekday).collect();
    assert_eq!(weekdays, WEEKDAYS.to_vec());
    assert!(view.iter().all(|(_, items)| items.is_empty()));
    assert!(view.is_empty());

    let counts = scheduler.agenda_counts();
    assert_eq!(counts.total(), 0);
    let labeled = counts.labeled();
    assert_eq!(labeled.len(), 3);
    assert_eq!(labeled["Task"], 0);
    assert_eq!(labeled["Special"], 0);
    assert_eq!(labeled["Regular"], 0);

    assert!(scheduler.upcoming_tasks(reference(), 7).is_empty());
    assert!(scheduler.agendas_for_day(reference()).is_empty());
    assert_eq!(scheduler.next_id().unwrap(), Some(1));
}

#[test]
fn counts_report_every_item_without_filtering() {
    let scheduler = MemoryScheduler::in_memory();
    scheduler
        .regular_store()
        .save(&RecurringItem::new(1, "Gym", "Regular", Weekday::Mon, at(8, 0)))
        .unwrap();
    scheduler
        .special_store()
        .save(&OneOffItem::new(2, "Old trip", "Special", date(2001, 1, 1), at(6, 0)))
        .unwrap();
    scheduler
        .task_store()
        .save(&TaskItem::new(3, "A", "Task", date(2030, 1, 1)))
        .unwrap();
    scheduler
        .task_store()
        .save(&TaskItem::new(4, "B", "Task", date(2000, 1, 1)))
        .unwrap();

    let counts = scheduler.agenda_counts();
    assert_eq!(counts.regular, 1);
    assert_eq!(counts.special, 1);
    assert_eq!(counts.task, 2);
    assert_eq!(counts.labeled()["Task"], 2);
}

#[test]
fn next_id_spans_all_three_kinds() {
    let scheduler = Scheduler::new(
        MemoryItemStore::with_items(vec![RecurringItem::new(
            4,
            "Gym",
            "Regular",
            Weekday::Mon,
            at(8, 0),
        )]),
        MemoryItemStore::with_items(vec![OneOffItem::new(
            11,
            "Trip",
            "Special",
            date(2026, 11, 2),
            at(6, 0),
        )]),
        MemoryItemStore::with_items(vec![TaskItem::new(7, "Pay", "Task", date(2026, 11, 1))]),
    );

    let id = scheduler.next_id().unwrap().unwrap();
    assert_eq!(id, 12);

    scheduler
        .task_store()
        .save(&TaskItem::new(id, "Follow-up", "Task", date(2026, 11, 3)))
        .unwrap();
    let next = scheduler.next_id().unwrap().unwrap();
    assert!(next > id);
    assert!(scheduler
        .find_by_id(id)
        .is_some_and(|item| item.title() == "Follow-up"));
}

#[test]
fn weekly_view_covers_every_weekday_of_the_reference_week() {
    let view = MemoryScheduler::in_memory().generate_weekly_schedule(reference());
    for (weekday, _) in view.iter() {
        assert_eq!(view.date_of(weekday).weekday(), weekday);
    }
}

#[test]
fn scheduler_can_borrow_stores_owned_elsewhere() {
    let regular = MemoryItemStore::<RecurringItem>::new();
    let special = MemoryItemStore::<OneOffItem>::new();
    let tasks = MemoryItemStore::<TaskItem>::new();
    tasks
        .save(&TaskItem::new(9, "Borrowed", "Task", reference()))
        .unwrap();

    let scheduler = Scheduler::new(&regular, &special, &tasks);
    assert_eq!(
        titles(&scheduler.agendas_for_day(reference())),
        vec!["Borrowed"]
    );

    scheduler
        .save(&AgendaItem::from(OneOffItem::new(
            10,
            "Added",
            "Special",
            reference(),
            at(7, 0),
        )))
        .unwrap();
    drop(scheduler);
    assert_eq!(special.find_all().len(), 1);
}
