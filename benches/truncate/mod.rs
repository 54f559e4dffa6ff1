use avltrim::AvlTree;
use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("truncate");

    for n_values in [100, 1_000, 10_000, 50_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = AvlTree::default();

    for _i in 0..n_values {
        t.insert(rand.next(), 42_usize);
    }

    // Every truncation discards roughly half of the keys; the measured time
    // should grow with the tree height, not with n_values.
    let mid = t.iter().nth(n_values / 2).map(|(k, _)| *k).unwrap_or_default();

    bench_remove_above(n_values, g, &t, mid);
    bench_remove_below(n_values, g, &t, mid);
    bench_remove_range(n_values, g, &t, rand);
}

macro_rules! truncate_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(
                n_values: usize,
                g: &mut BenchmarkGroup<M>,
                t: &AvlTree<u16, usize>,
                bound: u16,
            )
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(1));
                // Truncations per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter_batched(
                        || t.copy(),
                        |mut t| {
                            t.$name(&bound);
                            t
                        },
                        BatchSize::LargeInput,
                    )
                });
            }
        }
    };
}

truncate_bench!(remove_above);
truncate_bench!(remove_below);

fn bench_remove_range<M>(
    n_values: usize,
    g: &mut BenchmarkGroup<M>,
    t: &AvlTree<u16, usize>,
    rand: Lfsr,
) where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "remove_range",
    };

    g.throughput(Throughput::Elements(1));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (t.copy(), rand.clone().next_bounds()),
            |(mut t, (lower, upper))| {
                t.remove_range(&lower, &upper).unwrap();
                t
            },
            BatchSize::LargeInput,
        )
    });
}
