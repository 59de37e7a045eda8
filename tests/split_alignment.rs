// tests/split_alignment.rs
use proptest::prelude::*;
use segy_rs::*;

fn policy_strategy() -> impl Strategy<Value = SplitPolicy> {
    prop_oneof![
        (0u64..4).prop_map(|multiplier| SplitPolicy::TracesPerRecord { multiplier }),
        (0u64..50).prop_map(|traces| SplitPolicy::FixedTraces { traces }),
        (0u64..20_000).prop_map(|bytes| SplitPolicy::TargetBytes { bytes }),
    ]
}

fn plan_for(format_code: i16, sample_count: u16, traces_per_record: u16, data_len: usize, policy: SplitPolicy) -> FilePlan {
    let header = FileHeader { sample_count, format_code, traces_per_record, ..Default::default() };
    let mut bytes = header.encode();
    bytes.resize(FILE_HEADER_SIZE + data_len, 0);

    let mut storage = MemoryStorage::new();
    storage.insert("/p.sgy", bytes);
    SplitPlanner::new(&storage, policy).plan("/p.sgy").unwrap()
}

proptest! {
    #[test]
    fn splits_cover_data_on_record_boundaries(
        format_code in prop::sample::select(vec![1i16, 2, 3, 5, 8]),
        sample_count in 0u16..300,
        traces_per_record in 0u16..8,
        data_len in 0usize..60_000,
        policy in policy_strategy(),
    ) {
        let plan = plan_for(format_code, sample_count, traces_per_record, data_len, policy);
        let record = plan.params.trace_record_size;
        let file_length = (FILE_HEADER_SIZE + data_len) as u64;

        prop_assert_eq!(plan.file_length, file_length);
        prop_assert_eq!(plan.splits[0].offset, FILE_HEADER_SIZE as u64);
        prop_assert_eq!(plan.data_length(), data_len as u64);

        let last = plan.splits.len() - 1;
        for (i, split) in plan.splits.iter().enumerate() {
            prop_assert_eq!(split.index, i);
            prop_assert_eq!((split.offset - FILE_HEADER_SIZE as u64) % record, 0);
            if i < last {
                prop_assert!(split.length > 0);
                prop_assert_eq!(split.length % record, 0);
                prop_assert_eq!(split.end(), plan.splits[i + 1].offset);
            }
        }
        prop_assert_eq!(plan.splits[last].end(), file_length);
    }

    #[test]
    fn splits_read_back_every_trace_once(
        format_code in prop::sample::select(vec![1i16, 2, 3, 5, 8]),
        sample_count in 1u16..20,
        trace_count in 0i32..40,
        traces_per_split in 1u64..10,
    ) {
        let header = FileHeader { sample_count, format_code, ..Default::default() };
        let mut writer = SegyWriter::new(Vec::new(), &header).unwrap();
        for id in 1..=trace_count {
            let samples: Vec<f64> = (0..sample_count).map(|s| ((id + s as i32) % 100) as f64).collect();
            writer.write_trace(&TraceHeader { trace_id: id, ..Default::default() }, &samples).unwrap();
        }
        let mut storage = MemoryStorage::new();
        storage.insert("/r.sgy", writer.finish().unwrap());

        let plan = SplitPlanner::new(&storage, SplitPolicy::FixedTraces { traces: traces_per_split })
            .plan("/r.sgy")
            .unwrap();

        let mut ids = Vec::new();
        for split in &plan.splits {
            let source = storage.open_for_read(&split.path).unwrap();
            for trace in TraceSequenceReader::new(source, split, plan.params.clone()).unwrap() {
                let trace = trace.unwrap();
                prop_assert_eq!(trace.samples.len(), sample_count as usize);
                ids.push(trace.header.trace_id);
            }
        }
        prop_assert_eq!(ids, (1..=trace_count).collect::<Vec<_>>());
    }
}
