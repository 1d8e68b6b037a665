
use crate::helpers::{load_words, machine, machine_with_console};
use as_lib::assemble;
use image::Image;

#[test]
fn load_and_halt() {
    // 0: lda 2; 1: hlt; 2: data
    let mut cpu = machine(16);
    load_words(&mut cpu, 0, &[0x1002, 0x0000, 0x00ff]);
    cpu.run().unwrap();

    assert_eq!(cpu.acc(), 0x00ff);
    assert!(!cpu.is_active());
}

#[test]
fn assembled_sum() {
    let prog = assemble(
        r#"
        # sum two words into a third
                lda a
                add b
                sta sum
                hlt
        a:      hlt 5
        b:      hlt 3
        sum:    hlt 0
        "#,
    )
    .unwrap();

    let mut cpu = machine(16);
    cpu.load_image(&prog.image);
    cpu.run().unwrap();

    assert_eq!(cpu.acc(), 8);
    let sum_addr = *prog.symbols.get("sum").unwrap();
    assert_eq!(cpu.bus_mut().read(sum_addr), Some(8));
}

#[test]
fn assembled_echo_demo() {
    let prog = assemble(include_str!("../../demos/echo.s")).unwrap();

    let (mut cpu, pipe) = machine_with_console(16);
    cpu.load_image(&prog.image);
    pipe.write_input(b"hi");

    // lda, then three out/inp/bra iterations.
    for _ in 0..10 {
        cpu.step().unwrap();
    }

    let out: Vec<u8> = pipe.take_output().into();
    assert_eq!(out, b"Ahi");
    assert!(cpu.zero(), "input exhausted, last inp read zero");
}

#[test]
fn countdown_terminates() {
    let prog = assemble(
        r#"
        # count n down to zero, then stop
                lda n
        loop:   sub one
                brz done
                bra loop
        done:   hlt
        n:      hlt 5
        one:    hlt 1
        "#,
    )
    .unwrap();

    let mut cpu = machine(16);
    cpu.load_image(&prog.image);
    cpu.run().unwrap();
    assert_eq!(cpu.acc(), 0);
    assert!(cpu.zero());
}

#[test]
fn image_file_round_trip() {
    let prog = assemble("org. 0x10\nlda 0x12\nhlt\norg. 0x12\nhlt 0x41").unwrap();

    let mut buf = Vec::new();
    prog.image.write_to(&mut buf).unwrap();
    let reread = Image::read_from(buf.as_slice()).unwrap();
    assert_eq!(reread, prog.image);

    // Loading the reread image behaves identically.
    let mut cpu = machine(64);
    cpu.load_image(&reread);
    cpu.run_at(0x10).unwrap();
    assert_eq!(cpu.acc(), 0x41);
}

#[test]
fn disassembly_of_assembled_program() {
    let prog = assemble("lda 4\nout 0xff\nhlt").unwrap();
    let listing: Vec<String> = disassembler::disassemble(&prog.image)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        listing,
        ["0000\t\t LDA 0x4", "0001\t\t OUT 0xFF", "0002\t\t HLT 0x0"]
    );
}
