//! Benchmarks comparing Ratio<T> across integer backends
//!
//! Run with: cargo bench --bench ratio_benchmarks
//!
//! Each backend is measured against num-rational's BigRational:
//! - BigInt: arbitrary precision
//! - i128: native fixed width
//! - I256 / I1024: crypto-bigint sign-magnitude
//!
//! Covered operations:
//! - Construction (from_parts, from_float, parse)
//! - Arithmetic (add, mul, div)
//! - Comparison
//! - Float conversion
//! - Taylor series accumulation

use bigratio::{IntegerBackend, Ratio, I1024, I256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

type NumRational = BigRational;

fn num(n: i64, d: i64) -> NumRational {
    NumRational::new(BigInt::from(n), BigInt::from(d))
}

/// Macro to generate complete benchmark suite for a given backend
macro_rules! generate_ratio_benchmarks {
    ($mod_name:ident, $int_type:ty, $size_name:expr) => {
        mod $mod_name {
            use super::*;

            type TestInt = $int_type;
            type TestRatio = Ratio<TestInt>;

            fn ratio(n: i64, d: i64) -> TestRatio {
                TestRatio::from_parts(TestInt::from_i64(n), TestInt::from_i64(d)).unwrap()
            }

            // ====================================================================
            // CONSTRUCTION
            // ====================================================================

            pub fn bench_from_parts(c: &mut Criterion) {
                let bench_name = format!("{}/from_parts", $size_name);
                let mut group = c.benchmark_group(&bench_name);

                group.bench_function("Ratio", |b| {
                    b.iter(|| {
                        let r = TestRatio::from_parts(
                            black_box(TestInt::from_i64(12345)),
                            black_box(TestInt::from_i64(67890)),
                        );
                        black_box(r)
                    })
                });

                group.bench_function("num-rational", |b| {
                    b.iter(|| {
                        let r = NumRational::new(
                            black_box(BigInt::from(12345)),
                            black_box(BigInt::from(67890)),
                        );
                        black_box(r)
                    })
                });

                group.finish();
            }

            pub fn bench_from_float(c: &mut Criterion) {
                let bench_name = format!("{}/from_float", $size_name);
                let mut group = c.benchmark_group(&bench_name);

                let test_cases = vec![("small", 0.5), ("medium", 0.22314355131420976), ("tiny", 0.00001)];

                for (name, value) in test_cases {
                    group.bench_with_input(BenchmarkId::new("Ratio", name), &value, |b, &v| {
                        b.iter(|| black_box(TestRatio::from_float(black_box(v))))
                    });
                    group.bench_with_input(BenchmarkId::new("num-rational", name), &value, |b, &v| {
                        b.iter(|| black_box(NumRational::from_float(black_box(v))))
                    });
                }

                group.finish();
            }

            pub fn bench_parse(c: &mut Criterion) {
                let bench_name = format!("{}/parse", $size_name);
                let mut group = c.benchmark_group(&bench_name);
                let text = "-123456789/987654321";

                group.bench_function("Ratio", |b| {
                    b.iter(|| black_box(black_box(text).parse::<TestRatio>()))
                });
                group.bench_function("num-rational", |b| {
                    b.iter(|| black_box(black_box(text).parse::<NumRational>()))
                });

                group.finish();
            }

            // ====================================================================
            // ARITHMETIC
            // ====================================================================

            pub fn bench_addition(c: &mut Criterion) {
                let bench_name = format!("{}/add", $size_name);
                let mut group = c.benchmark_group(&bench_name);

                let (a, b_) = (ratio(355, 113), ratio(-22, 7));
                group.bench_function("Ratio", |b| b.iter(|| black_box(&a + &b_)));

                let (na, nb) = (num(355, 113), num(-22, 7));
                group.bench_function("num-rational", |b| b.iter(|| black_box(&na + &nb)));

                group.finish();
            }

            pub fn bench_multiplication(c: &mut Criterion) {
                let bench_name = format!("{}/mul", $size_name);
                let mut group = c.benchmark_group(&bench_name);

                let (a, b_) = (ratio(6, 35), ratio(14, 15));
                group.bench_function("Ratio", |b| b.iter(|| black_box(&a * &b_)));

                let (na, nb) = (num(6, 35), num(14, 15));
                group.bench_function("num-rational", |b| b.iter(|| black_box(&na * &nb)));

                group.finish();
            }

            pub fn bench_division(c: &mut Criterion) {
                let bench_name = format!("{}/div", $size_name);
                let mut group = c.benchmark_group(&bench_name);

                let (a, b_) = (ratio(-9, 28), ratio(3, -4));
                group.bench_function("Ratio", |b| b.iter(|| black_box(a.checked_div(&b_))));

                let (na, nb) = (num(-9, 28), num(3, -4));
                group.bench_function("num-rational", |b| b.iter(|| black_box(&na / &nb)));

                group.finish();
            }

            // ====================================================================
            // COMPARISON AND CONVERSION
            // ====================================================================

            pub fn bench_comparison(c: &mut Criterion) {
                let bench_name = format!("{}/cmp", $size_name);
                let mut group = c.benchmark_group(&bench_name);

                let (a, b_) = (ratio(103993, 33102), ratio(104348, 33215));
                group.bench_function("Ratio", |b| b.iter(|| black_box(a.cmp(&b_))));

                let (na, nb) = (num(103993, 33102), num(104348, 33215));
                group.bench_function("num-rational", |b| b.iter(|| black_box(na.cmp(&nb))));

                group.finish();
            }

            pub fn bench_to_f64(c: &mut Criterion) {
                let bench_name = format!("{}/to_f64", $size_name);
                let mut group = c.benchmark_group(&bench_name);

                let a = ratio(103993, 33102);
                group.bench_function("Ratio", |b| b.iter(|| black_box(a.to_f64())));

                let na = num(103993, 33102);
                group.bench_function("num-rational", |b| b.iter(|| black_box(na.to_f64())));

                group.finish();
            }

            // ====================================================================
            // REAL-WORLD WORKLOADS
            // ====================================================================

            /// e^x ≈ 1 + x + x²/2! + x³/3! + ... with x = 1/10
            pub fn bench_taylor_series(c: &mut Criterion) {
                let bench_name = format!("{}/taylor_series", $size_name);
                let mut group = c.benchmark_group(&bench_name);
                let iterations = 6;

                group.bench_function("Ratio", |b| {
                    let x = ratio(1, 10);
                    b.iter(|| {
                        let mut phi = TestRatio::one();
                        let mut term = x.clone();
                        for k in 2..(iterations + 2) {
                            phi += &term;
                            term = &(&term * &x) / &ratio(k, 1);
                        }
                        black_box(phi)
                    })
                });

                group.bench_function("num-rational", |b| {
                    let x = num(1, 10);
                    b.iter(|| {
                        let mut phi = num(1, 1);
                        let mut term = x.clone();
                        for k in 2..(iterations + 2) {
                            phi = phi + &term;
                            term = &term * &x / num(k, 1);
                        }
                        black_box(phi)
                    })
                });

                group.finish();
            }

            /// Export all benchmark functions for this backend
            pub fn register_all(c: &mut Criterion) {
                bench_from_parts(c);
                bench_from_float(c);
                bench_parse(c);
                bench_addition(c);
                bench_multiplication(c);
                bench_division(c);
                bench_comparison(c);
                bench_to_f64(c);
                bench_taylor_series(c);
            }
        }
    };
}

// ============================================================================
// INSTANTIATE BENCHMARK SUITES FOR EACH BACKEND
// ============================================================================

generate_ratio_benchmarks!(bigint_benches, BigInt, "BigInt");
generate_ratio_benchmarks!(i128_benches, i128, "i128");
generate_ratio_benchmarks!(i256_benches, I256, "I256");
generate_ratio_benchmarks!(i1024_benches, I1024, "I1024");

// ============================================================================
// BENCHMARK GROUPS
// ============================================================================

criterion_group!(bigint_benchmarks, bigint_benches::register_all);

criterion_group!(i128_benchmarks, i128_benches::register_all);

criterion_group!(i256_benchmarks, i256_benches::register_all);

criterion_group!(i1024_benchmarks, i1024_benches::register_all);

criterion_main!(bigint_benchmarks, i128_benchmarks, i256_benchmarks, i1024_benchmarks);
