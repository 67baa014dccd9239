// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lectern_bnb::monitor::no_op::NoOperationMonitor;
use lectern_bnb::search::AndSearch;
use lectern_bnb::state::AssignmentState;
use lectern_model::config::{Penalties, SearchLimits};
use lectern_model::index::{LectureIndex, LectureSlotIndex, SectionIndex, TutorialSlotIndex};
use lectern_model::instance::{Instance, InstanceBuilder};
use lectern_model::slot::{Slot, Weekday};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const HOURS: [u8; 6] = [8, 9, 10, 13, 14, 15];

/// A loosely constrained catalog: `num_courses` courses with two lecture
/// sections and one tutorial each, random preferences and a few
/// incompatibilities.
fn generate_instance(num_courses: usize, seed: u64) -> Instance<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut b = InstanceBuilder::new(format!("bench-{}-{}", num_courses, seed));
    b.with_penalties(Penalties::new(1, 1, 5, 3));
    b.with_limits(SearchLimits::default().with_max_iterations(20_000));

    for day in [Weekday::Monday, Weekday::Tuesday] {
        for hour in HOURS {
            b.add_lecture_slot(Slot::new(day, hour, 0, 3, 1, 1));
        }
    }
    for day in [Weekday::Monday, Weekday::Tuesday, Weekday::Friday] {
        for hour in HOURS {
            b.add_tutorial_slot(Slot::new(day, hour, 0, 4, 0, 1));
        }
    }

    let num_lecture_slots = 2 * HOURS.len();
    let num_tutorial_slots = 3 * HOURS.len();
    let mut lectures: Vec<LectureIndex> = Vec::with_capacity(2 * num_courses);

    for course in 0..num_courses {
        let section = SectionIndex::new(course);
        let first = b.add_lecture(format!("CPSC {} LEC 01", 200 + course), section);
        let second = b.add_lecture(format!("CPSC {} LEC 02", 200 + course), section);
        let tutorial = b.add_tutorial(format!("CPSC {} TUT 01", 200 + course), &[first, second]);

        for lecture in [first, second] {
            let slot = LectureSlotIndex::new(rng.random_range(0..num_lecture_slots));
            b.set_lecture_preference(lecture, slot, rng.random_range(1..=10));
        }
        let slot = TutorialSlotIndex::new(rng.random_range(0..num_tutorial_slots));
        b.set_tutorial_preference(tutorial, slot, rng.random_range(1..=10));

        if let Some(&other) = lectures.last() {
            if rng.random_bool(0.3) {
                b.add_not_compatible(first.into(), other.into());
            }
            if rng.random_bool(0.2) {
                b.add_pair(second.into(), other.into());
            }
        }
        lectures.push(first);
        lectures.push(second);
    }

    b.build()
}

fn bench_and_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("and_search");
    group.sample_size(20);

    for num_courses in [2, 4, 6] {
        let instance = generate_instance(num_courses, 0x5EED);
        group.throughput(Throughput::Elements(instance.num_activities() as u64));

        group.bench_with_input(
            BenchmarkId::new("courses", num_courses),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let search = AndSearch::new(black_box(instance));
                    let outcome =
                        search.run(AssignmentState::new(instance), NoOperationMonitor::new());
                    black_box(outcome.best_score())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_and_search);
criterion_main!(benches);
